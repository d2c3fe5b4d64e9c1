//! Thematic break (§4.C "Thematic break").

use crate::document::Block;
use crate::span::Span;
use nom::bytes::complete::take_till;

/// Lookahead the current line, strip spaces/tabs, and accept if what's left
/// is at least three identical `*`, `-`, or `_` characters.
pub fn thematic_break(input: Span) -> Option<(Span, Block<crate::document::Isp>)> {
    let (after_line, line): (Span, Span) = take_till::<_, _, nom::error::Error<Span>>(|c| c == '\n' || c == '\r')(input).ok()?;
    let stripped: String = line
        .fragment()
        .chars()
        .filter(|c| *c != ' ' && *c != '\t')
        .collect();
    if stripped.len() < 3 {
        return None;
    }
    let first = stripped.chars().next().unwrap();
    if !matches!(first, '*' | '-' | '_') {
        return None;
    }
    if !stripped.chars().all(|c| c == first) {
        return None;
    }
    let (rest, _) = crate::scan::eol_prime(after_line).ok()?;
    Some((rest, Block::ThematicBreak))
}

#[cfg(test)]
mod tests {
    use super::*;
    fn span(s: &str) -> Span {
        crate::span::new_span(s, "test.md")
    }

    #[test]
    fn smoke_test_accepts_three_dashes() {
        let (rest, block) = thematic_break(span("---\nnext")).unwrap();
        assert_eq!(block, Block::ThematicBreak);
        assert_eq!(*rest.fragment(), "next");
    }

    #[test]
    fn smoke_test_accepts_spaced_stars() {
        assert!(thematic_break(span("* * *\n")).is_some());
    }

    #[test]
    fn smoke_test_rejects_mixed_chars() {
        assert!(thematic_break(span("-*-\n")).is_none());
    }

    #[test]
    fn smoke_test_rejects_too_short() {
        assert!(thematic_break(span("--\n")).is_none());
    }
}
