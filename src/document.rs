//! The data model the parser produces (§3). The AST itself, its renderer and
//! its transformation API are explicitly out of scope for this crate; what
//! lives here is only what the two-phase parse emits.

use crate::diagnostic::Diagnostic;
use crate::pos::{NonEmpty, SourcePos};

/// An unparsed inline span ("inline source payload"): either the raw,
/// anchored text of an inline run waiting for the second pass, or a
/// diagnostic deferred from the block pass that must surface verbatim once
/// the block is "inlined" instead of being reparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Isp {
    Span(SourcePos, String),
    Error(Diagnostic),
}

/// A block, parameterised over its inline carrier: `Block<Isp>` is what the
/// block pass produces, `Block<NonEmpty<Inline>>` is what the inline pass
/// turns it into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<T> {
    ThematicBreak,
    Heading { level: u8, content: T },
    CodeBlock { info: Option<String>, body: String },
    /// A paragraph inside a tight list item, rendered without a wrapping
    /// paragraph by downstream consumers.
    Naked(T),
    Paragraph(T),
    Blockquote(Vec<Block<T>>),
    OrderedList { start: u32, items: Vec<Vec<Block<T>>> },
    UnorderedList { items: Vec<Vec<Block<T>>> },
}

impl<T> Block<T> {
    pub fn map_inline<U>(self, f: &mut impl FnMut(T) -> U) -> Block<U> {
        match self {
            Block::ThematicBreak => Block::ThematicBreak,
            Block::Heading { level, content } => Block::Heading {
                level,
                content: f(content),
            },
            Block::CodeBlock { info, body } => Block::CodeBlock { info, body },
            Block::Naked(t) => Block::Naked(f(t)),
            Block::Paragraph(t) => Block::Paragraph(f(t)),
            Block::Blockquote(blocks) => {
                Block::Blockquote(blocks.into_iter().map(|b| b.map_inline(f)).collect())
            }
            Block::OrderedList { start, items } => Block::OrderedList {
                start,
                items: items
                    .into_iter()
                    .map(|item| item.into_iter().map(|b| b.map_inline(f)).collect())
                    .collect(),
            },
            Block::UnorderedList { items } => Block::UnorderedList {
                items: items
                    .into_iter()
                    .map(|item| item.into_iter().map(|b| b.map_inline(f)).collect())
                    .collect(),
            },
        }
    }
}

/// A leaf of formatted inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Plain(String),
    LineBreak,
    Emphasis(NonEmpty<Inline>),
    Strong(NonEmpty<Inline>),
    Strikeout(NonEmpty<Inline>),
    Subscript(NonEmpty<Inline>),
    Superscript(NonEmpty<Inline>),
    CodeSpan(String),
    Link {
        inner: NonEmpty<Inline>,
        uri: String,
        title: Option<String>,
    },
    Image {
        alt: NonEmpty<Inline>,
        uri: String,
        title: Option<String>,
    },
}

/// The root of a successfully parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub yaml: Option<serde_yml::Value>,
    pub blocks: Vec<Block<NonEmpty<Inline>>>,
}
