//! Classification of genes into up- and downregulated sets.

use crate::data::{NamedSet, RecordTable, DOWNREGULATED_SUFFIX, UPREGULATED_SUFFIX};
use tracing::warn;

/// The two sets derived from one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedComparison {
    /// Comparison name (normalized file name).
    pub comparison: String,
    /// Genes with fold-change strictly above the threshold.
    pub upregulated: NamedSet,
    /// All other genes, including those exactly at the threshold.
    pub downregulated: NamedSet,
}

impl ClassifiedComparison {
    /// The sets in collection order: upregulated, then downregulated.
    pub fn into_sets(self) -> [NamedSet; 2] {
        [self.upregulated, self.downregulated]
    }
}

/// Split a record table into upregulated and downregulated sets.
///
/// A gene is upregulated iff `fold_change > threshold`. Empty sets are kept
/// and reported with a warning.
pub fn classify_records(
    table: &RecordTable,
    comparison: &str,
    threshold: f64,
) -> ClassifiedComparison {
    let mut upregulated = NamedSet::new(format!("{}{}", comparison, UPREGULATED_SUFFIX));
    let mut downregulated = NamedSet::new(format!("{}{}", comparison, DOWNREGULATED_SUFFIX));

    for (identifier, fold_change) in table.iter() {
        if fold_change > threshold {
            upregulated.insert(identifier);
        } else {
            downregulated.insert(identifier);
        }
    }

    for set in [&upregulated, &downregulated] {
        if set.is_empty() {
            warn!(
                set = %set.name,
                file = %table.source().display(),
                "{} is empty",
                set.name
            );
        }
    }

    ClassifiedComparison {
        comparison: comparison.to_string(),
        upregulated,
        downregulated,
    }
}
