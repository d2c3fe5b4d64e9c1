//! Source position tracking shared by every diagnostic and span in the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line/column position tied to the filename the input was parsed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePos {
    pub filename: String,
    pub line: usize,
    pub column: usize,
}

impl SourcePos {
    pub fn new(filename: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A vector that is statically guaranteed to hold at least one element.
///
/// The parser never manufactures an empty diagnostic list or an empty document
/// blocks-inline sequence where the spec forbids it; `NonEmpty` makes that a type
/// invariant instead of a runtime assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmpty<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmpty<T> {
    pub fn new(head: T) -> Self {
        Self {
            head,
            tail: Vec::new(),
        }
    }

    pub fn from_vec(mut v: Vec<T>) -> Option<Self> {
        if v.is_empty() {
            return None;
        }
        let head = v.remove(0);
        Some(Self { head, tail: v })
    }

    pub fn push(&mut self, item: T) {
        self.tail.push(item);
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &T {
        &self.head
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    pub fn into_vec(self) -> Vec<T> {
        let mut v = Vec::with_capacity(self.len());
        v.push(self.head);
        v.extend(self.tail);
        v
    }

    /// Append another `NonEmpty` onto this one, consuming both.
    pub fn append(mut self, other: NonEmpty<T>) -> Self {
        self.tail.push(other.head);
        self.tail.extend(other.tail);
        self
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_single_element() {
        let ne = NonEmpty::new(1);
        assert_eq!(ne.len(), 1);
        assert_eq!(*ne.first(), 1);
    }

    #[test]
    fn smoke_test_from_vec_empty() {
        assert!(NonEmpty::<i32>::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn smoke_test_append_concatenates_in_order() {
        let a = NonEmpty::from_vec(vec![1, 2]).unwrap();
        let b = NonEmpty::from_vec(vec![3, 4]).unwrap();
        let combined = a.append(b);
        assert_eq!(combined.into_vec(), vec![1, 2, 3, 4]);
    }
}
