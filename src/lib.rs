//! UpSet-style set membership analysis of differential expression results
//!
//! This library turns per-comparison differential expression (DE) result
//! files into up- and downregulated gene sets, builds a gene × set boolean
//! membership matrix, and counts genes per membership combination for UpSet
//! plots.
//!
//! # Overview
//!
//! - **data**: Core data structures (RecordTable, NamedSet, SetCollection, MembershipMatrix)
//! - **parse**: Readers for DE result files, file lists and plain gene lists
//! - **classify**: Set naming and up/down classification by fold-change threshold
//! - **aggregate**: Subset pattern counting
//! - **export**: Membership/subset tables and plot data for an external renderer
//! - **pipeline**: Run configuration and execution
//!
//! # Example
//!
//! ```no_run
//! use de_upset::prelude::*;
//!
//! let config = PipelineConfig::new(InputMode::DeFiles {
//!     file_list: "de_files.txt".into(),
//! })
//! .with_threshold(0.0)
//! .with_table_path("UpSet_genes.tsv");
//!
//! let (result, _written) = Pipeline::new(config).run().unwrap();
//! for (pattern, count) in result.counts.iter() {
//!     println!("{}: {}", pattern.label(result.set_labels.as_slice()), count);
//! }
//! ```

pub mod aggregate;
pub mod classify;
pub mod data;
pub mod error;
pub mod export;
pub mod parse;
pub mod pipeline;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::aggregate::{aggregate_subsets, SubsetCounts, SubsetPattern};
    pub use crate::classify::{classify_records, ClassifiedComparison, NameNormalizer};
    pub use crate::data::{GeneRecord, MembershipMatrix, NamedSet, RecordTable, SetCollection};
    pub use crate::error::{Result, UpsetError};
    pub use crate::export::{
        write_matrix, write_subset_counts, ColumnLabels, ImageFormat, Orientation, PlotOptions,
        UpSetPlotData,
    };
    pub use crate::parse::{
        parse_de_file, read_file_list, read_gene_list, OnMalformed, ParseOptions,
    };
    pub use crate::pipeline::{
        build_de_sets, build_list_sets, run_de_files, InputMode, OutputConfig, Pipeline,
        PipelineConfig, PipelineResult,
    };
}
