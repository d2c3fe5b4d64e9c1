//! MMark: a CommonMark-flavored block/inline parser with YAML front matter
//! and strikeout/subscript/superscript extensions, reporting diagnostics as
//! values instead of panicking or stopping at the first error.

pub mod block;
pub mod diagnostic;
pub mod document;
pub mod driver;
pub mod entities;
pub mod inline;
pub mod pos;
pub mod refs;
pub mod scan;
pub mod span;
pub mod yaml;

pub use diagnostic::{Diagnostic, ErrorKind, MMarkErr};
pub use document::{Block, Document, Inline, Isp};
pub use driver::parse;
pub use pos::{NonEmpty, SourcePos};
