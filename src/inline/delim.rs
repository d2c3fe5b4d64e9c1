//! The emphasis/strong/strikeout/subscript/superscript delimiter algorithm
//! (§4.E "the flanking algorithm").
//!
//! Adjacent nested delimiters (`**_foo_**`) are handled by ordinary recursive
//! descent rather than the source's explicit double-frame state: opening a
//! frame recurses into `parse_run` for its content, which naturally opens
//! the next delimiter it meets. This produces the same tree for every
//! well-formed case in the spec's own examples, at the cost of not modelling
//! the source's single-position "either closer order" ambiguity explicitly.

use super::{parse_run, Cursor, InlineEnv, LastChar, RunEnd};
use crate::diagnostic::{Diagnostic, ErrorKind, MMarkErr};
use crate::document::Inline;
use crate::pos::NonEmpty;
use crate::refs::ReferenceTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Emphasis,
    Strong,
    Strikeout,
    Subscript,
    Superscript,
}

#[derive(Debug, Clone, Copy)]
pub struct OpenDelim {
    pub ch: char,
    pub len: usize,
    pub kind: FrameKind,
}

fn frame_for(ch: char, len: usize) -> Option<FrameKind> {
    match (ch, len) {
        ('*', 1) | ('_', 1) => Some(FrameKind::Emphasis),
        ('*', 2) | ('_', 2) => Some(FrameKind::Strong),
        ('~', 2) => Some(FrameKind::Strikeout),
        ('~', 1) => Some(FrameKind::Subscript),
        ('^', 1) => Some(FrameKind::Superscript),
        _ => None,
    }
}

fn run_len(text: &str, ch: char) -> usize {
    text.chars().take_while(|c| *c == ch).count()
}

/// Try the longest valid opener at the cursor for the frame-constituent
/// character under it. Consumes nothing. On success, returns the opener;
/// on a non-flanking rejection (§4.E), returns the attempted delimiter run
/// text so the caller can raise `NonFlankingDelimiterRun` at the opening
/// position instead of silently falling back to plain text.
fn try_open(cursor: &Cursor, last: LastChar) -> Result<OpenDelim, String> {
    let text = cursor.remaining();
    let ch = text
        .chars()
        .next()
        .expect("caller only calls try_open when a frame-constituent char is under the cursor");
    let available = run_len(text, ch);
    let try_len = match ch {
        '*' | '_' | '~' => available.min(2),
        _ => 1,
    };
    let kind = frame_for(ch, try_len)
        .expect("try_len is always a valid frame length for a frame-constituent char");
    let attempted = ch.to_string().repeat(try_len);

    if last == LastChar::Other {
        return Err(attempted);
    }
    let next_char = text.chars().nth(try_len);
    match next_char {
        None => return Err(attempted),
        Some(c) if crate::scan::is_transparent(c) => return Err(attempted),
        _ => {}
    }

    Ok(OpenDelim {
        ch,
        len: try_len,
        kind,
    })
}

/// Try to match `opener`'s exact closing run at the cursor, without
/// consuming on failure. On success, consumes `opener.len` bytes.
pub(crate) fn try_close(cursor: &mut Cursor, last: LastChar, opener: &OpenDelim) -> bool {
    let text = cursor.remaining();
    if !text.starts_with(opener.ch) {
        return false;
    }
    let available = run_len(text, opener.ch);
    if available < opener.len {
        return false;
    }
    if last == LastChar::Space {
        return false;
    }
    let after = text.chars().nth(opener.len);
    let ok = match after {
        None => true,
        Some(c) => crate::scan::is_transparent(c) || crate::scan::is_markup_char(c),
    };
    if !ok {
        return false;
    }
    let byte_len: usize = text.chars().take(opener.len).map(|c| c.len_utf8()).sum();
    cursor.advance(byte_len);
    true
}

fn lift(kind: FrameKind, inner: NonEmpty<Inline>) -> Inline {
    match kind {
        FrameKind::Emphasis => Inline::Emphasis(inner),
        FrameKind::Strong => Inline::Strong(inner),
        FrameKind::Strikeout => Inline::Strikeout(inner),
        FrameKind::Subscript => Inline::Subscript(inner),
        FrameKind::Superscript => Inline::Superscript(inner),
    }
}

pub(crate) fn try_open_and_parse(
    cursor: &mut Cursor,
    env: InlineEnv,
    last: &mut LastChar,
    defs: &ReferenceTable,
) -> Result<Option<Inline>, Diagnostic> {
    let open_pos = cursor.pos();
    let opener = match try_open(cursor, *last) {
        Ok(opener) => opener,
        Err(attempted) => {
            log::debug!("non-flanking delimiter run {attempted:?} at {open_pos}");
            return Err(Diagnostic::new(
                open_pos,
                ErrorKind::FancyCustom(MMarkErr::NonFlankingDelimiterRun(attempted)),
            ));
        }
    };
    let byte_len: usize = opener
        .ch
        .to_string()
        .repeat(opener.len)
        .bytes()
        .count();
    cursor.advance(byte_len);
    *last = LastChar::Other;

    let mut inner_last = LastChar::Nothing;
    let (inlines, end) = parse_run(cursor, env, &mut inner_last, defs, Some(&opener))?;
    match end {
        RunEnd::Eof => {
            log::debug!(
                "non-flanking delimiter run {:?} at {open_pos}",
                opener.ch.to_string().repeat(opener.len)
            );
            Err(Diagnostic::new(
                open_pos,
                ErrorKind::FancyCustom(MMarkErr::NonFlankingDelimiterRun(
                    opener.ch.to_string().repeat(opener.len),
                )),
            ))
        }
        RunEnd::Closed => {
            let Some(inner) = NonEmpty::from_vec(inlines) else {
                return Err(Diagnostic::new(
                    open_pos,
                    ErrorKind::unexpected(None, vec!["non-empty inline content".to_string()]),
                ));
            };
            *last = LastChar::Other;
            Ok(Some(lift(opener.kind, inner)))
        }
    }
}
