//! Grouping membership rows into UpSet subset counts.

use crate::data::MembershipMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Combination of set memberships, one flag per matrix column.
///
/// Ordering is lexicographic over columns with `false < true`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubsetPattern(pub Vec<bool>);

impl SubsetPattern {
    /// Create a pattern from flags.
    pub fn new(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Membership flags in column order.
    pub fn flags(&self) -> &[bool] {
        &self.0
    }

    /// Number of sets included in this pattern.
    pub fn degree(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }

    /// Names of the included sets joined with `&`; `(none)` for the
    /// all-false pattern.
    pub fn label<S: AsRef<str>>(&self, set_names: &[S]) -> String {
        let included: Vec<&str> = self
            .0
            .iter()
            .zip(set_names)
            .filter(|(&f, _)| f)
            .map(|(_, name)| name.as_ref())
            .collect();
        if included.is_empty() {
            "(none)".to_string()
        } else {
            included.join("&")
        }
    }
}

impl From<&[bool]> for SubsetPattern {
    fn from(flags: &[bool]) -> Self {
        Self(flags.to_vec())
    }
}

/// Element counts per observed subset pattern.
///
/// Patterns with no elements are absent. Iteration is in ascending pattern
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubsetCounts {
    counts: BTreeMap<SubsetPattern, usize>,
}

impl SubsetCounts {
    /// Count for a pattern (0 if absent).
    pub fn get(&self, pattern: &[bool]) -> usize {
        self.counts
            .get(&SubsetPattern::from(pattern))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate over (pattern, count) in ascending pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&SubsetPattern, usize)> {
        self.counts.iter().map(|(p, &c)| (p, c))
    }

    /// Patterns sorted by descending count, ties in ascending pattern order.
    pub fn sorted_by_size(&self) -> Vec<(&SubsetPattern, usize)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    fn increment(&mut self, pattern: &[bool]) {
        *self.counts.entry(SubsetPattern::from(pattern)).or_insert(0) += 1;
    }
}

/// Group matrix rows by membership pattern and count them.
pub fn aggregate_subsets(matrix: &MembershipMatrix) -> SubsetCounts {
    let mut counts = SubsetCounts::default();
    for (_, pattern) in matrix.rows() {
        counts.increment(pattern);
    }
    counts
}

impl std::fmt::Display for SubsetCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Subset Counts")?;
        writeln!(f, "  Patterns: {}", self.len())?;
        writeln!(f, "  Elements: {}", self.total())?;
        for (pattern, count) in self.sorted_by_size() {
            let bits: String = pattern
                .flags()
                .iter()
                .map(|&b| if b { '1' } else { '0' })
                .collect();
            writeln!(f, "  {}  {}", bits, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{NamedSet, SetCollection};

    fn scenario_matrix() -> MembershipMatrix {
        let sets = SetCollection::from_sets(vec![
            NamedSet::from_members("file1_upregulated", ["g1", "g2"]),
            NamedSet::from_members("file1_downregulated", ["g3"]),
            NamedSet::from_members("file2_upregulated", ["g2"]),
            NamedSet::from_members("file2_downregulated", ["g4"]),
        ])
        .unwrap();
        MembershipMatrix::from_sets(&sets)
    }

    #[test]
    fn test_counts() {
        let counts = aggregate_subsets(&scenario_matrix());
        assert_eq!(counts.len(), 4);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(&[true, false, true, false]), 1);
        assert_eq!(counts.get(&[true, false, false, false]), 1);
        assert_eq!(counts.get(&[true, true, true, true]), 0);
    }

    #[test]
    fn test_ascending_pattern_order() {
        let counts = aggregate_subsets(&scenario_matrix());
        let patterns: Vec<&[bool]> = counts.iter().map(|(p, _)| p.flags()).collect();
        assert_eq!(
            patterns,
            vec![
                &[false, false, false, true][..],
                &[false, true, false, false][..],
                &[true, false, false, false][..],
                &[true, false, true, false][..],
            ]
        );
    }

    #[test]
    fn test_grouping_merges_equal_rows() {
        let sets = SetCollection::from_sets(vec![
            NamedSet::from_members("a", ["g1", "g2", "g3"]),
            NamedSet::from_members("b", ["g2", "g3"]),
        ])
        .unwrap();
        let counts = aggregate_subsets(&MembershipMatrix::from_sets(&sets));
        assert_eq!(counts.get(&[true, true]), 2);
        assert_eq!(counts.get(&[true, false]), 1);

        let sorted = counts.sorted_by_size();
        assert_eq!(sorted[0].0.flags(), &[true, true]);
        assert_eq!(sorted[0].1, 2);
    }

    #[test]
    fn test_empty_matrix() {
        let counts = aggregate_subsets(&MembershipMatrix::from_sets(&SetCollection::new()));
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_pattern_label_and_degree() {
        let names = ["a_up", "a_down", "b_up"];
        let p = SubsetPattern::new(vec![true, false, true]);
        assert_eq!(p.label(&names), "a_up&b_up");
        assert_eq!(p.degree(), 2);
        assert_eq!(SubsetPattern::new(vec![false; 3]).label(&names), "(none)");
    }
}
