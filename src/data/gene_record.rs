//! Per-comparison gene records parsed from a differential expression file.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single gene with its signed fold-change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    /// Gene identifier (first column by default).
    pub identifier: String,
    /// Signed (log) fold-change.
    pub fold_change: f64,
}

impl GeneRecord {
    /// Create a new record.
    pub fn new(identifier: impl Into<String>, fold_change: f64) -> Self {
        Self {
            identifier: identifier.into(),
            fold_change,
        }
    }
}

/// All records of one comparison file, keyed by gene identifier.
///
/// Inserting an identifier that is already present replaces its fold-change,
/// so a file with duplicated identifiers keeps the last occurrence.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    source: PathBuf,
    records: BTreeMap<String, f64>,
}

impl RecordTable {
    /// Create an empty table for the given source file.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            records: BTreeMap::new(),
        }
    }

    /// Insert a record, returning the previous fold-change if the identifier
    /// was already present.
    pub fn insert(&mut self, identifier: String, fold_change: f64) -> Option<f64> {
        self.records.insert(identifier, fold_change)
    }

    /// Insert a parsed record, see [`RecordTable::insert`].
    pub fn push(&mut self, record: GeneRecord) -> Option<f64> {
        self.insert(record.identifier, record.fold_change)
    }

    /// Path of the file these records came from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Fold-change for an identifier.
    pub fn get(&self, identifier: &str) -> Option<f64> {
        self.records.get(identifier).copied()
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over (identifier, fold-change) in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.records.iter().map(|(id, &fc)| (id.as_str(), fc))
    }
}

impl IntoIterator for RecordTable {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_insert_wins() {
        let mut table = RecordTable::new("cmp.tsv");
        assert_eq!(table.insert("g1".into(), 1.5), None);
        assert_eq!(table.insert("g1".into(), -0.5), Some(1.5));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("g1"), Some(-0.5));

        assert_eq!(table.push(GeneRecord::new("g1", 3.0)), Some(-0.5));
        assert_eq!(table.get("g1"), Some(3.0));
    }

    #[test]
    fn test_iteration_sorted_by_identifier() {
        let mut table = RecordTable::new("cmp.tsv");
        table.insert("gB".into(), 1.0);
        table.insert("gA".into(), 2.0);
        table.insert("gC".into(), -1.0);

        let ids: Vec<&str> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["gA", "gB", "gC"]);
        assert_eq!(table.source(), Path::new("cmp.tsv"));
    }
}
