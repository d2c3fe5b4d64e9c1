//! Diagnostic values: every parse failure is returned, never thrown.

use crate::pos::{NonEmpty, SourcePos};
use thiserror::Error;

/// A single reported problem, anchored to one or more source positions
/// (a chain of positions lets a block-level diagnostic carry the inner
/// inline position that actually triggered it alongside the block's own).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: NonEmpty<SourcePos>,
    pub kind: ErrorKind,
}

impl Diagnostic {
    pub fn new(position: SourcePos, kind: ErrorKind) -> Self {
        Self {
            position: NonEmpty::new(position),
            kind,
        }
    }

    pub fn primary_position(&self) -> &SourcePos {
        self.position.first()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.primary_position(), self.kind)
    }
}

impl std::error::Error for Diagnostic {}

/// Either a generic "unexpected token" trivial error from a primitive scanner,
/// or a domain-specific `MMarkErr`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unexpected {}, expected one of: {}", item.as_deref().unwrap_or("end of input"), expected.join(", "))]
    TrivialUnexpected {
        item: Option<String>,
        expected: Vec<String>,
    },

    #[error(transparent)]
    FancyCustom(#[from] MMarkErr),
}

impl ErrorKind {
    pub fn unexpected(item: Option<String>, expected: Vec<String>) -> Self {
        ErrorKind::TrivialUnexpected { item, expected }
    }
}

/// Domain-specific diagnostics the parser can raise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MMarkErr {
    #[error("YAML parse error: {0}")]
    YamlParseError(String),

    #[error("ordered list start index {0} is too big")]
    ListStartIndexTooBig(u32),

    #[error("list index out of order: got {actual}, expected {expected}")]
    ListIndexOutOfOrder { actual: u32, expected: u32 },

    #[error("duplicate reference definition for label {0:?}")]
    DuplicateReferenceDefinition(String),

    #[error("could not find reference definition for label {label:?}{}", candidate_suffix(candidates))]
    CouldNotFindReferenceDefinition {
        label: String,
        candidates: Vec<String>,
    },

    #[error("unknown HTML entity name {0:?}")]
    UnknownHtmlEntityName(String),

    #[error("invalid numeric character reference {0:#x}")]
    InvalidNumericCharacter(u32),

    #[error("non-flanking delimiter run {0:?}")]
    NonFlankingDelimiterRun(String),
}

fn candidate_suffix(candidates: &[String]) -> String {
    if candidates.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", candidates.join(", "))
    }
}

impl MMarkErr {
    pub fn could_not_find_reference_definition(
        label: impl Into<String>,
        candidates: Vec<String>,
    ) -> Self {
        MMarkErr::CouldNotFindReferenceDefinition {
            label: label.into(),
            candidates,
        }
    }
}
