//! The top-level entry point (§1, §7 "Error collation"): front matter, the
//! block pass, then an inline pass over every deferred `Isp::Span`, collating
//! every diagnostic raised along the way into a single failure value.

use crate::block::{parse_blocks, BlockEnv};
use crate::diagnostic::Diagnostic;
use crate::document::{Block, Document, Isp};
use crate::inline;
use crate::pos::NonEmpty;
use crate::refs::ReferenceTable;
use crate::span::new_span;

/// Parse a complete document. `filename` is carried into every position for
/// diagnostics; it needn't name a real file.
pub fn parse(filename: &str, input: &str) -> Result<Document, NonEmpty<Diagnostic>> {
    let span = new_span(input, filename);
    let (after_front_matter, yaml, yaml_diag) = crate::yaml::parse_front_matter(span);

    let mut defs = ReferenceTable::new();
    let mut diags: Vec<Diagnostic> = Vec::new();
    let (_, mut blocks) = parse_blocks(
        after_front_matter,
        BlockEnv::top_level(),
        &mut defs,
        &mut diags,
    );

    if let Some(diag) = yaml_diag {
        blocks.insert(0, Block::Paragraph(Isp::Error(diag)));
    }

    let inlined: Vec<Block<NonEmpty<crate::document::Inline>>> = blocks
        .into_iter()
        .map(|block| inline_block(block, &defs, &mut diags))
        .collect();

    match NonEmpty::from_vec(diags) {
        Some(all_diags) => Err(all_diags),
        None => Ok(Document {
            yaml,
            blocks: inlined,
        }),
    }
}

/// Run the inline pass over every `Isp::Span` inside a block, recursing into
/// containers. A block whose own `Isp` already carries a deferred error
/// (`Isp::Error`) surfaces that diagnostic directly rather than attempting to
/// inline-parse anything; a failed inline parse is recorded the same way any
/// other diagnostic is, and the block is filled with a single placeholder
/// `Plain("")` inline so the overall tree stays well-formed even though the
/// whole parse will report as failed.
fn inline_block(
    block: Block<Isp>,
    defs: &ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> Block<NonEmpty<crate::document::Inline>> {
    block.map_inline(&mut |isp| resolve_isp(isp, defs, diags))
}

fn resolve_isp(
    isp: Isp,
    defs: &ReferenceTable,
    diags: &mut Vec<Diagnostic>,
) -> NonEmpty<crate::document::Inline> {
    match isp {
        Isp::Error(diag) => {
            diags.push(diag);
            NonEmpty::new(crate::document::Inline::Plain(String::new()))
        }
        Isp::Span(pos, text) => match inline::parse_span(&text, pos, defs) {
            Ok(inlines) => inlines,
            Err(diag) => {
                diags.push(diag);
                NonEmpty::new(crate::document::Inline::Plain(String::new()))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Inline;

    #[test]
    fn smoke_test_simple_paragraph() {
        let doc = parse("t.md", "hello *world*\n").unwrap();
        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Paragraph(inlines) => {
                assert!(inlines
                    .iter()
                    .any(|i| matches!(i, Inline::Emphasis(_))));
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn smoke_test_front_matter_and_body() {
        let doc = parse("t.md", "---\ntitle: Hi\n---\n# Heading\n").unwrap();
        assert!(doc.yaml.is_some());
        assert_eq!(doc.blocks.len(), 1);
        assert!(matches!(doc.blocks[0], Block::Heading { level: 1, .. }));
    }

    #[test]
    fn smoke_test_missing_reference_is_collated_as_error() {
        let err = parse("t.md", "See [broken link].\n").unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn smoke_test_thematic_break() {
        let doc = parse("t.md", "---x---\n\n***\n").unwrap();
        assert!(doc
            .blocks
            .iter()
            .any(|b| matches!(b, Block::ThematicBreak)));
    }
}
