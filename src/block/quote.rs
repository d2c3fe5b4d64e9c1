//! Blockquote (§4.C "Blockquote").

use crate::block::{parse_blocks, BlockEnv};
use crate::diagnostic::Diagnostic;
use crate::document::{Block, Isp};
use crate::refs::ReferenceTable;
use crate::span::Span;
use nom::character::complete::char as nom_char;

/// `>` right here, with an optional single space after it that doesn't
/// count against the inner content's indentation.
fn marker(input: Span) -> Option<Span> {
    let (after_marker, _) = nom_char::<_, nom::error::Error<Span>>('>')(input).ok()?;
    let rest = match nom_char::<_, nom::error::Error<Span>>(' ')(after_marker) {
        Ok((rest, _)) => rest,
        Err(_) => after_marker,
    };
    Some(rest)
}

pub fn peek_blockquote(input: Span) -> bool {
    marker(input).is_some()
}

/// `col` is the tab-expanded column (§6) at which `>` sits, as measured by
/// the caller's block dispatch — reused here rather than re-derived via
/// `input.get_column()`, which undercounts a tab-indented marker's column.
pub fn blockquote<'a>(
    input: Span<'a>,
    col: usize,
    env: BlockEnv,
    defs: &mut ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> Option<(Span<'a>, Block<Isp>)> {
    let after_marker = marker(input)?;
    let inner_level = col + 1;
    let inner_env = env.with(false, inner_level);
    let (rest, blocks) = parse_blocks(after_marker, inner_env, defs, diags);
    Some((rest, Block::Blockquote(blocks)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(s: &str) -> Span {
        crate::span::new_span(s, "test.md")
    }

    #[test]
    fn smoke_test_single_line_blockquote() {
        let mut defs = ReferenceTable::new();
        let mut diags = Vec::new();
        let env = BlockEnv::top_level();
        let (rest, block) = blockquote(span("> hi\n"), 1, env, &mut defs, &mut diags).unwrap();
        match block {
            Block::Blockquote(blocks) => assert_eq!(blocks.len(), 1),
            _ => panic!("not a blockquote"),
        }
        assert_eq!(*rest.fragment(), "");
    }

    #[test]
    fn smoke_test_peek_detects_marker() {
        assert!(peek_blockquote(span("> hi\n")));
        assert!(!peek_blockquote(span("hi\n")));
    }
}
