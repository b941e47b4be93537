//! Boolean element × set membership matrix.

use crate::data::SetCollection;
use serde::{Deserialize, Serialize};

/// Membership of every element of the set union in every named set.
///
/// Rows are elements in lexicographic order, columns are set names in
/// collection order. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipMatrix {
    /// Element identifiers (row names), sorted.
    elements: Vec<String>,
    /// Set names (column names).
    set_names: Vec<String>,
    /// Row-major cells, `elements.len() * set_names.len()` long.
    cells: Vec<bool>,
}

impl MembershipMatrix {
    /// Build the matrix from an ordered collection of sets.
    ///
    /// An empty collection yields an empty matrix.
    pub fn from_sets(sets: &SetCollection) -> Self {
        let elements: Vec<String> = sets.union().into_iter().map(String::from).collect();
        let set_names: Vec<String> = sets.names().into_iter().map(String::from).collect();

        let mut cells = Vec::with_capacity(elements.len() * set_names.len());
        for element in &elements {
            cells.extend(sets.iter().map(|set| set.contains(element)));
        }

        Self {
            elements,
            set_names,
            cells,
        }
    }

    /// Number of elements (rows).
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of sets (columns).
    #[inline]
    pub fn n_sets(&self) -> usize {
        self.set_names.len()
    }

    /// Check if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element identifiers (row names).
    #[inline]
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Set names (column names).
    #[inline]
    pub fn set_names(&self) -> &[String] {
        &self.set_names
    }

    /// Membership of element `row` in set `col`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.n_sets() + col]
    }

    /// Membership pattern of one element.
    pub fn row(&self, row: usize) -> &[bool] {
        let n = self.n_sets();
        &self.cells[row * n..(row + 1) * n]
    }

    /// Iterate over (element, pattern) rows.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[bool])> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(move |(i, e)| (e.as_str(), self.row(i)))
    }

    /// Row index of an element.
    pub fn row_of(&self, element: &str) -> Option<usize> {
        self.elements
            .binary_search_by(|e| e.as_str().cmp(element))
            .ok()
    }

    /// Membership pattern of an element, if present.
    pub fn pattern_of(&self, element: &str) -> Option<&[bool]> {
        self.row_of(element).map(|row| self.row(row))
    }

    /// Number of members per set (column sums).
    pub fn column_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.n_sets()];
        for (_, pattern) in self.rows() {
            for (col, &present) in pattern.iter().enumerate() {
                if present {
                    sizes[col] += 1;
                }
            }
        }
        sizes
    }

    /// Elements whose membership exactly matches `pattern`.
    pub fn members_of(&self, pattern: &[bool]) -> Vec<&str> {
        self.rows()
            .filter(|(_, row)| *row == pattern)
            .map(|(e, _)| e)
            .collect()
    }
}
