//! Plain text, escaped characters, entity/numeric references, and hard/soft
//! line breaks (§4.E "Plain text", "Hard line break").

use super::{classify_last_char, Cursor, LastChar};
use crate::diagnostic::{Diagnostic, MMarkErr};
use crate::document::Inline;

fn is_trigger(c: char) -> bool {
    matches!(c, '`' | '[' | '!' | '<' | '\\') || crate::scan::is_frame_constituent(c)
}

/// `\` followed by EOL → hard line break (consuming the next line's leading
/// spaces/tabs); `\` followed by ASCII punctuation → that literal character;
/// otherwise a bare backslash.
pub fn parse_backslash(cursor: &mut Cursor, last: &mut LastChar) -> Result<Inline, Diagnostic> {
    cursor.advance(1); // the backslash itself
    if cursor.remaining().starts_with(['\n', '\r']) || cursor.remaining().starts_with("\r\n") {
        let eol_len = if cursor.remaining().starts_with("\r\n") {
            2
        } else {
            1
        };
        cursor.advance(eol_len);
        if cursor.is_eof() {
            // EOL followed by nothing: not a valid hard break (needs a following line).
            *last = LastChar::Space;
            return Ok(Inline::Plain(String::new()));
        }
        let skip: usize = cursor
            .remaining()
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .map(|c| c.len_utf8())
            .sum();
        cursor.advance(skip);
        *last = LastChar::Space;
        return Ok(Inline::LineBreak);
    }
    if let Some(c) = cursor.peek() {
        if crate::scan::is_ascii_punctuation(c) {
            cursor.advance(c.len_utf8());
            *last = classify_last_char(c);
            return Ok(Inline::Plain(c.to_string()));
        }
    }
    *last = LastChar::Other;
    Ok(Inline::Plain("\\".to_string()))
}

/// Accumulate a run of plain text, decoding entity/numeric references and
/// collapsing soft line breaks to a single space, stopping just before the
/// next character that would dispatch to a different rule. The character
/// under the cursor when this is called is always consumed as plain text
/// regardless of its class (the caller has already decided it belongs here).
pub fn parse_plain_run(cursor: &mut Cursor, last: &mut LastChar) -> Result<Inline, Diagnostic> {
    let mut out = String::new();
    let mut first = true;
    loop {
        if cursor.is_eof() {
            break;
        }
        let c = cursor.peek().expect("checked not eof");
        if !first && is_trigger(c) {
            break;
        }
        first = false;

        if c == '&' {
            if let Some(decoded) = try_entity_or_numeric(cursor)? {
                *last = LastChar::Other;
                out.push_str(&decoded);
                continue;
            }
            out.push('&');
            cursor.advance(1);
            *last = LastChar::Other;
            continue;
        }

        if c == '\n' || c == '\r' {
            while out.ends_with(' ') || out.ends_with('\t') {
                out.pop();
            }
            let eol_len = if cursor.remaining().starts_with("\r\n") {
                2
            } else {
                1
            };
            cursor.advance(eol_len);
            let skip: usize = cursor
                .remaining()
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .map(|c| c.len_utf8())
                .sum();
            cursor.advance(skip);
            if !cursor.is_eof() {
                out.push(' ');
            }
            *last = LastChar::Space;
            continue;
        }

        out.push(c);
        cursor.advance(c.len_utf8());
        *last = classify_last_char(c);
    }
    Ok(Inline::Plain(out))
}

/// Try to parse `&NAME;` or `&#[xX]?DIGITS;` at the cursor. Returns `Ok(None)`
/// if the text under the cursor doesn't even look like a reference (bare
/// `&`, left untouched); `Err` if it looks like one but decodes to nothing
/// valid.
fn try_entity_or_numeric(cursor: &mut Cursor) -> Result<Option<String>, Diagnostic> {
    let text = cursor.remaining();
    debug_assert!(text.starts_with('&'));
    let body = &text[1..];

    if let Some(after_hash) = body.strip_prefix('#') {
        let (is_hex, digits_part) = if let Some(rest) = after_hash
            .strip_prefix('x')
            .or_else(|| after_hash.strip_prefix('X'))
        {
            (true, rest)
        } else {
            (false, after_hash)
        };
        let digit_pred: fn(char) -> bool = if is_hex {
            |c: char| c.is_ascii_hexdigit()
        } else {
            |c: char| c.is_ascii_digit()
        };
        let digits: String = digits_part.chars().take_while(|c| digit_pred(*c)).collect();
        if digits.is_empty() {
            return Ok(None);
        }
        let after_digits = &digits_part[digits.len()..];
        if !after_digits.starts_with(';') {
            return Ok(None);
        }
        let consumed = 1 + 1 + (if is_hex { 1 } else { 0 }) + digits.len() + 1;
        let value = u32::from_str_radix(&digits, if is_hex { 16 } else { 10 }).map_err(|_| {
            cursor.err(MMarkErr::InvalidNumericCharacter(u32::MAX))
        })?;
        let decoded = crate::entities::decode_numeric(value).map_err(|e| cursor.err(e))?;
        cursor.advance(consumed);
        return Ok(Some(decoded.to_string()));
    }

    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if name.is_empty() {
        return Ok(None);
    }
    let after_name = &body[name.len()..];
    if !after_name.starts_with(';') {
        return Ok(None);
    }
    let consumed = 1 + name.len() + 1;
    let replacement = crate::entities::lookup_named(&name).map_err(|e| cursor.err(e))?;
    cursor.advance(consumed);
    Ok(Some(replacement.to_string()))
}
