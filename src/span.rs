//! Span plumbing shared by the block and inline grammars.
//!
//! Grounded on the teacher's `parser/shared.rs` / `grammar/shared.rs` split: a
//! `nom_locate::LocatedSpan` carries line/column/offset through every
//! combinator, and a single helper turns a span into the crate's own
//! `SourcePos` once a diagnostic or an `Isp` needs to own one.
//!
//! `Extra` is kept to a bare `&str` (not an owned/`Rc` string) specifically so
//! that `Span` stays `Copy` — the whole block dispatch loop in `block::mod`
//! tries one construct after another against the *same* span, and without
//! `Copy` every failed attempt would move it away from the caller.

use crate::pos::SourcePos;
use nom_locate::LocatedSpan;

#[derive(Debug, Clone, Copy)]
pub struct Extra<'a> {
    pub filename: &'a str,
}

pub type Span<'a> = LocatedSpan<&'a str, Extra<'a>>;

pub fn new_span<'a>(input: &'a str, filename: &'a str) -> Span<'a> {
    LocatedSpan::new_extra(input, Extra { filename })
}

/// The position of the first byte of `span`.
pub fn start_pos(span: Span) -> SourcePos {
    SourcePos::new(
        span.extra.filename.to_string(),
        span.location_line() as usize,
        span.get_column(),
    )
}

/// The position immediately after the last byte of `span` (used when a
/// diagnostic should point just past a construct, e.g. a dangling opening
/// delimiter at end of input).
pub fn end_pos(span: Span) -> SourcePos {
    let text = span.fragment();
    let newline_count = text.matches('\n').count();
    let line = span.location_line() as usize + newline_count;
    let column = if let Some(last_nl) = text.rfind('\n') {
        text[last_nl + 1..].chars().count() + 1
    } else {
        span.get_column() + text.chars().count()
    };
    SourcePos::new(span.extra.filename.to_string(), line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_start_pos_first_line() {
        let span = new_span("hello", "test.md");
        let pos = start_pos(span);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn smoke_test_end_pos_multiline() {
        let span = new_span("ab\ncd", "test.md");
        let pos = end_pos(span);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
    }
}
