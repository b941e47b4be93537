//! Subset aggregation for UpSet-style summaries.

mod subset;

pub use subset::{aggregate_subsets, SubsetCounts, SubsetPattern};
