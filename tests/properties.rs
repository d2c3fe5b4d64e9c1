//! Property-based invariants (spec §8): these hold for every input, not
//! just the literal boundary scenarios, so they're expressed as `proptest`
//! generators rather than a fixed table.

use mmark::parse;
use proptest::prelude::*;

proptest! {
    /// §8 invariant 1: parsing always terminates and, on failure, reports
    /// at least one diagnostic.
    #[test]
    fn parse_always_terminates_with_nonempty_errors_on_failure(s in ".{0,500}") {
        match parse("t.md", &s) {
            Ok(_doc) => {}
            Err(diags) => prop_assert!(diags.len() >= 1),
        }
    }

    /// §8 invariant 3: a reference definition resolves identically via the
    /// shortcut and collapsed forms.
    #[test]
    fn shortcut_and_collapsed_reference_agree(label in "[a-zA-Z][a-zA-Z0-9]{0,8}", uri in "[a-z]{1,10}://[a-z]{1,10}") {
        let input = format!("[{label}]: {uri}\n\n[{label}] and [{label}][]\n");
        let doc = parse("t.md", &input).expect("well-formed input should parse");
        let mmark::Block::Paragraph(inlines) = &doc.blocks[0] else {
            panic!("expected a paragraph block");
        };
        let links: Vec<&mmark::Inline> = inlines
            .iter()
            .filter(|i| matches!(i, mmark::Inline::Link { .. }))
            .collect();
        prop_assert_eq!(links.len(), 2);
        let uris: Vec<&str> = links
            .iter()
            .map(|l| match l {
                mmark::Inline::Link { uri, .. } => uri.as_str(),
                _ => unreachable!(),
            })
            .collect();
        prop_assert_eq!(uris[0], uris[1]);
    }
}

/// §8 invariant 5: emphasis nesting of depth `d` produces a tree of depth
/// `d` without stack overflow, for `d` well beyond any realistic document.
#[test]
fn deep_emphasis_nesting_does_not_overflow() {
    let depth = 256;
    let mut input = String::new();
    for _ in 0..depth {
        input.push('*');
    }
    input.push('x');
    for _ in 0..depth {
        input.push('*');
    }
    input.push('\n');

    let doc = parse("t.md", &input).expect("deeply nested emphasis should parse");
    let mmark::Block::Paragraph(inlines) = &doc.blocks[0] else {
        panic!("expected a paragraph block");
    };

    fn measure_depth(inline: &mmark::Inline) -> usize {
        match inline {
            mmark::Inline::Emphasis(inner) => 1 + inner.iter().map(measure_depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    let max_depth = inlines.iter().map(measure_depth).max().unwrap_or(0);
    assert_eq!(max_depth, depth);
}

/// §8 invariant 4: collating N blocks with K erroneous inlines yields `Err`
/// with at least K diagnostics.
#[test]
fn collation_reports_at_least_k_diagnostics_for_k_bad_blocks() {
    for k in 0..5usize {
        let mut input = String::new();
        for i in 0..k {
            input.push_str(&format!("[missing{i}]\n\n"));
        }
        input.push_str("fine\n");
        match parse("t.md", &input) {
            Ok(_) => assert_eq!(k, 0, "expected failure for k={k}"),
            Err(diags) => assert!(diags.len() >= k),
        }
    }
}
