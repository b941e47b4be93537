//! Named gene sets and the ordered collection fed into the membership matrix.

use crate::error::{Result, UpsetError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Suffix appended to the comparison name for the upregulated set.
pub const UPREGULATED_SUFFIX: &str = "_upregulated";
/// Suffix appended to the comparison name for the downregulated set.
pub const DOWNREGULATED_SUFFIX: &str = "_downregulated";

/// A named set of gene identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSet {
    /// Set name, unique within a collection.
    pub name: String,
    /// Member identifiers.
    pub members: BTreeSet<String>,
}

impl NamedSet {
    /// Create an empty set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeSet::new(),
        }
    }

    /// Create a set from any collection of identifiers.
    pub fn from_members<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a member.
    pub fn insert(&mut self, identifier: impl Into<String>) -> bool {
        self.members.insert(identifier.into())
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, identifier: &str) -> bool {
        self.members.contains(identifier)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Short label of this set, see [`short_label`].
    pub fn short_label(&self) -> String {
        short_label(&self.name)
    }
}

/// Short label used by UpSet plots: `_upregulated` becomes `_up`,
/// `_downregulated` becomes `_down`.
pub fn short_label(name: &str) -> String {
    name.replace("regulated", "").replace("_geneids", "")
}

/// Ordered sequence of named sets with pairwise distinct names.
///
/// Order is insertion order: file order, then upregulated before
/// downregulated for each comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCollection {
    sets: Vec<NamedSet>,
}

impl SetCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { sets: Vec::new() }
    }

    /// Build a collection, rejecting duplicated names.
    pub fn from_sets(sets: impl IntoIterator<Item = NamedSet>) -> Result<Self> {
        let mut collection = Self::new();
        for set in sets {
            collection.push(set)?;
        }
        Ok(collection)
    }

    /// Append a set. Fails if a set with the same name is already present.
    pub fn push(&mut self, set: NamedSet) -> Result<()> {
        if self.sets.iter().any(|s| s.name == set.name) {
            return Err(UpsetError::DuplicateSetName(set.name));
        }
        self.sets.push(set);
        Ok(())
    }

    /// Number of sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Set names in collection order.
    pub fn names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a set by name.
    pub fn get(&self, name: &str) -> Option<&NamedSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// Iterate over sets in order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedSet> {
        self.sets.iter()
    }

    /// Union of all members, sorted and deduplicated.
    pub fn union(&self) -> BTreeSet<&str> {
        self.sets
            .iter()
            .flat_map(|s| s.members.iter().map(String::as_str))
            .collect()
    }

    /// Names of sets with no members.
    pub fn empty_sets(&self) -> Vec<&str> {
        self.sets
            .iter()
            .filter(|s| s.is_empty())
            .map(|s| s.name.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a SetCollection {
    type Item = &'a NamedSet;
    type IntoIter = std::slice::Iter<'a, NamedSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}
