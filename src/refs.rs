//! The link/image reference-definition table (§3, §4.B).
//!
//! Owned by one block-pass invocation, mutated only while that pass runs,
//! and read-only during the inline pass — the single piece of state in the
//! whole parser that is *not* restored when a scoped block environment
//! exits, matching §4.B ("the `defs` table is not restored; registration is
//! document-global").

use std::collections::HashMap;

/// Trim the label and collapse every run of internal whitespace to a single
/// space. Per the Open Question in §9, labels are left case-sensitive after
/// normalisation — the source's `mkLabel` does not lowercase.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub uri: String,
    pub title: Option<String>,
}

#[derive(Debug, Default)]
pub struct ReferenceTable {
    defs: HashMap<String, Definition>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under `raw_label`. Returns `false` (and leaves
    /// the table untouched) if the normalised key already exists — the
    /// first definition for a label always wins.
    pub fn insert(&mut self, raw_label: &str, def: Definition) -> bool {
        let key = normalize_label(raw_label);
        if self.defs.contains_key(&key) {
            return false;
        }
        self.defs.insert(key, def);
        true
    }

    pub fn lookup(&self, raw_label: &str) -> Option<&Definition> {
        self.defs.get(&normalize_label(raw_label))
    }

    /// Candidate labels for a "could not find reference" diagnostic: every
    /// registered label, for the caller to narrow down with its own
    /// similarity heuristic (kept simple: return all of them, capped).
    pub fn candidates(&self) -> Vec<String> {
        let mut v: Vec<String> = self.defs.keys().cloned().collect();
        v.sort();
        v.truncate(5);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_normalize_label_collapses_whitespace() {
        assert_eq!(normalize_label("  foo   bar\n baz "), "foo bar baz");
    }

    #[test]
    fn smoke_test_insert_rejects_duplicate_normalized_key() {
        let mut table = ReferenceTable::new();
        assert!(table.insert(
            "Foo  Bar",
            Definition {
                uri: "/a".into(),
                title: None
            }
        ));
        assert!(!table.insert(
            "Foo Bar",
            Definition {
                uri: "/b".into(),
                title: None
            }
        ));
        assert_eq!(table.lookup("foo bar"), None);
        assert_eq!(table.lookup("Foo Bar").unwrap().uri, "/a");
    }

    #[test]
    fn smoke_test_case_sensitive_lookup() {
        let mut table = ReferenceTable::new();
        table.insert(
            "foo",
            Definition {
                uri: "/a".into(),
                title: None,
            },
        );
        assert!(table.lookup("FOO").is_none());
    }
}
