//! Inline parsing (§4.D, §4.E): the second pass over each block's deferred
//! `Isp` text, with access to the document-wide reference table.
//!
//! Unlike the block pass, this operates over a plain `&str` slice (the text
//! an `Isp::Span` already captured) rather than a fresh `nom_locate::Span` —
//! the text has already been lifted out of the original document, so
//! position tracking here is a small manual offset from the `Isp`'s anchor
//! position instead of nom_locate's own line/column machinery.

mod codespan;
mod delim;
mod link;
mod text;

use crate::diagnostic::{Diagnostic, ErrorKind, MMarkErr};
use crate::document::Inline;
use crate::pos::{NonEmpty, SourcePos};
use crate::refs::ReferenceTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastChar {
    Nothing,
    Space,
    Other,
}

pub fn classify_last_char(c: char) -> LastChar {
    if c.is_whitespace() || crate::scan::is_transparent_punctuation(c) {
        LastChar::Space
    } else {
        LastChar::Other
    }
}

/// The scoped permissions threaded through inline parsing (§4.D). `allow_empty`
/// is enforced by the caller of a frame/link/image's inner run, not by the
/// cursor loop itself.
#[derive(Debug, Clone, Copy)]
pub struct InlineEnv {
    pub allow_links: bool,
    pub allow_images: bool,
}

impl InlineEnv {
    pub fn top() -> Self {
        Self {
            allow_links: true,
            allow_images: true,
        }
    }

    pub fn no_links(&self) -> Self {
        Self {
            allow_links: false,
            ..*self
        }
    }

    pub fn no_images(&self) -> Self {
        Self {
            allow_images: false,
            ..*self
        }
    }
}

/// A cursor over an `Isp::Span`'s captured text, translating byte offsets
/// back into absolute `SourcePos` values anchored at the span's first
/// character.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub text: &'a str,
    pub byte_pos: usize,
    base: SourcePos,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, base: SourcePos) -> Self {
        Self {
            text,
            byte_pos: 0,
            base,
        }
    }

    pub fn remaining(&self) -> &'a str {
        &self.text[self.byte_pos..]
    }

    pub fn is_eof(&self) -> bool {
        self.byte_pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn advance(&mut self, bytes: usize) {
        self.byte_pos += bytes;
    }

    /// The absolute position of the byte currently under the cursor.
    pub fn pos(&self) -> SourcePos {
        self.pos_at(self.byte_pos)
    }

    pub fn pos_at(&self, byte_offset: usize) -> SourcePos {
        let consumed = &self.text[..byte_offset];
        let newline_count = consumed.matches('\n').count();
        let line = self.base.line + newline_count;
        let column = if let Some(last_nl) = consumed.rfind('\n') {
            consumed[last_nl + 1..].chars().count() + 1
        } else {
            self.base.column + consumed.chars().count()
        };
        SourcePos::new(self.base.filename.clone(), line, column)
    }

    fn err(&self, kind: MMarkErr) -> Diagnostic {
        Diagnostic::new(self.pos(), ErrorKind::FancyCustom(kind))
    }
}

/// What ended a `parse_run` call: plain end-of-input, or a successfully
/// matched closing delimiter for the frame the caller opened.
pub(crate) enum RunEnd {
    Eof,
    Closed,
}

/// Parse inline content until EOF or, if `closer` is given, until a matching
/// closing delimiter run is found (consumed on return).
pub(crate) fn parse_run(
    cursor: &mut Cursor,
    env: InlineEnv,
    last: &mut LastChar,
    defs: &ReferenceTable,
    closer: Option<&delim::OpenDelim>,
) -> Result<(Vec<Inline>, RunEnd), Diagnostic> {
    let mut out = Vec::new();
    loop {
        if let Some(opener) = closer {
            if delim::try_close(cursor, *last, opener) {
                return Ok((out, RunEnd::Closed));
            }
        }
        if cursor.is_eof() {
            return Ok((out, RunEnd::Eof));
        }
        let c = cursor.peek().expect("checked not EOF");
        let inline = dispatch(cursor, env, last, defs, c)?;
        if let Some(inline) = inline {
            out.push(inline);
        }
    }
}

fn dispatch(
    cursor: &mut Cursor,
    env: InlineEnv,
    last: &mut LastChar,
    defs: &ReferenceTable,
    c: char,
) -> Result<Option<Inline>, Diagnostic> {
    match c {
        '`' => codespan::parse(cursor, last).map(Some),
        '[' => {
            if env.allow_links {
                link::parse_link(cursor, env, last, defs).map(Some)
            } else {
                Err(cursor.err(MMarkErr::NonFlankingDelimiterRun("[".to_string())))
            }
        }
        '!' if env.allow_images && cursor.remaining()[1..].starts_with('[') => {
            link::parse_image(cursor, env, last, defs).map(Some)
        }
        '<' if env.allow_links => match link::try_autolink(cursor, last) {
            Some(inline) => Ok(Some(inline)),
            None => text::parse_plain_run(cursor, last).map(Some),
        },
        '\\' => text::parse_backslash(cursor, last).map(Some),
        c if crate::scan::is_frame_constituent(c) => {
            delim::try_open_and_parse(cursor, env, last, defs)
        }
        _ => text::parse_plain_run(cursor, last).map(Some),
    }
}

/// Parse inline content up to (not including) a literal `]`, used for link
/// and image inner text. Unlike `parse_run`, an unterminated run (hits EOF
/// before `]`) is reported to the caller via `terminated = false` so it can
/// fall back to treating the leading `[`/`![` as plain text.
pub(crate) fn parse_until_bracket(
    cursor: &mut Cursor,
    env: InlineEnv,
    last: &mut LastChar,
    defs: &ReferenceTable,
) -> Result<(Vec<Inline>, bool), Diagnostic> {
    let mut out = Vec::new();
    loop {
        if cursor.peek() == Some(']') {
            return Ok((out, true));
        }
        if cursor.is_eof() {
            return Ok((out, false));
        }
        let c = cursor.peek().expect("checked not eof");
        let inline = dispatch(cursor, env, last, defs, c)?;
        if let Some(inline) = inline {
            out.push(inline);
        }
    }
}

/// The non-empty-content entry point for a deferred span: top level of a
/// block, or the inner content of a frame/link/image once its own
/// `allow_empty` gate has let it be called at all.
pub fn parse_span(
    text: &str,
    base: SourcePos,
    defs: &ReferenceTable,
) -> Result<NonEmpty<Inline>, Diagnostic> {
    let mut cursor = Cursor::new(text, base);
    let mut last = LastChar::Nothing;
    let (inlines, _) = parse_run(&mut cursor, InlineEnv::top(), &mut last, defs, None)?;
    NonEmpty::from_vec(inlines).ok_or_else(|| {
        Diagnostic::new(
            base,
            ErrorKind::unexpected(None, vec!["inline content".to_string()]),
        )
    })
}
