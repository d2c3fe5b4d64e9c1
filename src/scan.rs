//! Primitive scanners (§4.A): whitespace/EOL, escaped characters, and the
//! character classes the inline flanking algorithm and block dispatch both
//! rely on. Grounded on the teacher's `grammar/shared.rs` (`count_indentation`,
//! `skip_indentation`) generalized from "4 columns" to the full whitespace/EOL
//! vocabulary the spec requires.

use crate::span::Span;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char as nom_char, one_of},
    combinator::{opt, recognize},
    multi::many0_count,
    IResult,
};

fn is_space_or_tab(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_ws_or_eol(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// `sc`: zero-or-more of space/tab/LF/CR.
pub fn sc(input: Span) -> IResult<Span, Span> {
    take_while(is_ws_or_eol)(input)
}

/// `sc1`: one-or-more of space/tab/LF/CR.
pub fn sc1(input: Span) -> IResult<Span, Span> {
    take_while1(is_ws_or_eol)(input)
}

/// `sc'`: zero-or-more of space/tab (no newlines).
pub fn sc_prime(input: Span) -> IResult<Span, Span> {
    take_while(is_space_or_tab)(input)
}

/// `sc1'`: one-or-more of space/tab (no newlines).
pub fn sc1_prime(input: Span) -> IResult<Span, Span> {
    take_while1(is_space_or_tab)(input)
}

/// EOL: LF | CRLF | CR. Fails (consumes nothing) at EOF or on any other char.
pub fn eol(input: Span) -> IResult<Span, Span> {
    alt((recognize(tag("\r\n")), recognize(nom_char('\n')), recognize(nom_char('\r'))))(input)
}

/// `eol'`: returns whether an EOL was consumed; never fails (false at EOF).
pub fn eol_prime(input: Span) -> IResult<Span, bool> {
    match opt(eol)(input)? {
        (rest, Some(_)) => Ok((rest, true)),
        (rest, None) => Ok((rest, false)),
    }
}

/// ASCII punctuation usable after a backslash escape: `[!-/ :-@ \[-` \{-~]`.
pub fn is_ascii_punctuation(c: char) -> bool {
    matches!(c as u32, 0x21..=0x2F | 0x3A..=0x40 | 0x5B..=0x60 | 0x7B..=0x7E)
}

/// `\` followed by ASCII punctuation decodes to the literal punctuation
/// character; a backslash before anything else is not an escape.
pub fn escaped_char(input: Span) -> IResult<Span, char> {
    let (input, _) = nom_char('\\')(input)?;
    let (input, c) = one_of(PUNCT_SET)(input)?;
    Ok((input, c))
}

const PUNCT_SET: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Frame-constituent characters: delimiter-run members for emphasis/strong/
/// strikeout/sub/superscript.
pub fn is_frame_constituent(c: char) -> bool {
    matches!(c, '*' | '_' | '~' | '^')
}

/// Markup characters: frame constituents plus the bracket/backtick family
/// that a right-flanking closer is allowed to be followed by.
pub fn is_markup_char(c: char) -> bool {
    is_frame_constituent(c) || matches!(c, '[' | ']' | '`')
}

/// Transparent punctuation, per §4.A.
pub fn is_transparent_punctuation(c: char) -> bool {
    matches!(c, '!' | '"' | '(' | ')' | ',' | '-' | '.' | ':' | ';' | '?' | '{' | '}' | '\u{2013}' | '\u{2014}')
}

/// Transparent: Unicode whitespace or transparent punctuation.
pub fn is_transparent(c: char) -> bool {
    c.is_whitespace() || is_transparent_punctuation(c)
}

/// Effective column width of `input` up to the first non-indentation
/// character, expanding tabs to the next multiple of 4.
pub fn indent_width(input: &str) -> usize {
    let mut cols = 0usize;
    for c in input.chars() {
        match c {
            ' ' => cols += 1,
            '\t' => cols += 4 - (cols % 4),
            _ => break,
        }
    }
    cols
}

/// Consume up to `max_cols` columns worth of leading spaces/tabs (tab = 4
/// columns, never split). Returns the number of columns actually consumed.
pub fn skip_indentation(input: Span, max_cols: usize) -> (Span, usize) {
    let mut cols = 0usize;
    let mut bytes = 0usize;
    for c in input.fragment().chars() {
        if cols >= max_cols {
            break;
        }
        match c {
            ' ' => {
                cols += 1;
                bytes += 1;
            }
            '\t' => {
                let width = 4 - (cols % 4);
                if cols + width <= max_cols {
                    cols += width;
                    bytes += 1;
                } else {
                    break;
                }
            }
            _ => break,
        }
    }
    let (rest, _) = nom::bytes::complete::take::<_, _, nom::error::Error<Span>>(bytes)(input)
        .expect("byte count derived from the same fragment");
    (rest, cols)
}

/// Tab-expanded column (1-based) of the first non-indentation character of
/// `input`, found by scanning forward through its own leading spaces/tabs
/// (tab = 4 columns, matching `indent_width`). Consumes nothing.
///
/// Only valid when that leading whitespace is still sitting in `input`'s
/// fragment, unconsumed — a call site that already stripped it (e.g. past a
/// blank-line skip via `sc`) has nothing left to scan and must derive the
/// column from what it stripped instead, via `line_indent_width`. Using
/// `input.get_column()` here would count a tab as one column rather than
/// four, same as `indent_width` would if it didn't special-case tabs.
pub fn column_of(input: Span) -> usize {
    indent_width(input.fragment()) + 1
}

/// Tab-expanded column (1-based) reached after consuming `consumed`, the
/// whitespace/blank-line run a `sc`-style scan just swallowed. Only the text
/// after the last line break counts: anything before that belonged to a
/// line already left behind, and doesn't contribute to this one's
/// indentation.
pub fn line_indent_width(consumed: &str) -> usize {
    let tail = match consumed.rfind(['\n', '\r']) {
        Some(i) => &consumed[i + 1..],
        None => consumed,
    };
    indent_width(tail) + 1
}
