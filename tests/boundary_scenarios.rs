//! Crate-level integration coverage for the literal boundary scenarios
//! (spec §8) that exercise front matter, block, and inline parsing together
//! rather than any single submodule in isolation.

use mmark::{parse, Block, Inline};
use pretty_assertions::assert_eq;

fn expect_ok(input: &str) -> mmark::Document {
    match parse("t.md", input) {
        Ok(doc) => doc,
        Err(errs) => panic!("expected Ok, got errors: {errs:?}", errs = errs.into_vec()),
    }
}

#[test]
fn front_matter_then_paragraph() {
    let doc = expect_ok("---\nfoo: 1\n---\nhi");
    assert_eq!(doc.yaml.as_ref().unwrap()["foo"].as_i64(), Some(1));
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::Paragraph(inlines) => {
            assert_eq!(inlines.iter().cloned().collect::<Vec<_>>(), vec![Inline::Plain("hi".to_string())]);
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn atx_heading_with_closing_sequence() {
    let doc = expect_ok("# Heading #\n");
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::Heading { level, content } => {
            assert_eq!(*level, 1);
            assert_eq!(content.iter().cloned().collect::<Vec<_>>(), vec![Inline::Plain("Heading".to_string())]);
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn fenced_code_block_with_info_string() {
    let doc = expect_ok("```ruby\nputs 1\n```\n");
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::CodeBlock { info, body } => {
            assert_eq!(info.as_deref(), Some("ruby"));
            assert_eq!(body, "puts 1\n");
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn tight_unordered_list_is_naked() {
    let doc = expect_ok("* a\n* b\n");
    match &doc.blocks[0] {
        Block::UnorderedList { items } => {
            assert_eq!(items.len(), 2);
            for item in items {
                assert!(matches!(item.as_slice(), [Block::Naked(_)]));
            }
        }
        other => panic!("expected unordered list, got {other:?}"),
    }
}

#[test]
fn loose_unordered_list_is_paragraph() {
    let doc = expect_ok("* a\n\n* b\n");
    match &doc.blocks[0] {
        Block::UnorderedList { items } => {
            assert_eq!(items.len(), 2);
            for item in items {
                assert!(matches!(item.as_slice(), [Block::Paragraph(_)]));
            }
        }
        other => panic!("expected unordered list, got {other:?}"),
    }
}

#[test]
fn reference_definition_resolves_shortcut_link() {
    let doc = expect_ok("[x]: http://e\n\n[x]\n");
    assert_eq!(doc.blocks.len(), 1);
    match &doc.blocks[0] {
        Block::Paragraph(inlines) => {
            let first = inlines.iter().next().unwrap();
            match first {
                Inline::Link { uri, title, .. } => {
                    assert_eq!(uri, "http://e");
                    assert_eq!(*title, None);
                }
                other => panic!("expected link, got {other:?}"),
            }
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn nested_strong_and_emphasis() {
    let doc = expect_ok("**bold *and* italic**\n");
    match &doc.blocks[0] {
        Block::Paragraph(inlines) => {
            let first = inlines.iter().next().unwrap();
            match first {
                Inline::Strong(inner) => {
                    let items: Vec<_> = inner.iter().cloned().collect();
                    assert_eq!(items.len(), 3);
                    assert_eq!(items[0], Inline::Plain("bold ".to_string()));
                    assert!(matches!(&items[1], Inline::Emphasis(e) if e.iter().next() == Some(&Inline::Plain("and".to_string()))));
                    assert_eq!(items[2], Inline::Plain(" italic".to_string()));
                }
                other => panic!("expected strong, got {other:?}"),
            }
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn missing_reference_definition_is_reported() {
    let err = parse("t.md", "[oops]\n").unwrap_err();
    let diags = err.into_vec();
    assert_eq!(diags.len(), 1);
    match &diags[0].kind {
        mmark::ErrorKind::FancyCustom(mmark::MMarkErr::CouldNotFindReferenceDefinition {
            label,
            candidates,
        }) => {
            assert_eq!(label, "oops");
            assert!(candidates.is_empty());
        }
        other => panic!("expected CouldNotFindReferenceDefinition, got {other:?}"),
    }
}

#[test]
fn collated_gives_at_least_one_diagnostic_per_bad_block() {
    let input = "[a]\n\n[b]\n\n[c]: /c\n\nok\n";
    let err = parse("t.md", input).unwrap_err();
    let diags = err.into_vec();
    // [a] and [b] each fail to resolve; [c] is a valid reference definition.
    assert_eq!(diags.len(), 2);
}
