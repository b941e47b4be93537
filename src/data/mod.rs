//! Data structures for gene set membership analysis.

mod gene_record;
mod membership;
mod named_set;

pub use gene_record::{GeneRecord, RecordTable};
pub use membership::MembershipMatrix;
pub use named_set::{
    short_label, NamedSet, SetCollection, DOWNREGULATED_SUFFIX, UPREGULATED_SUFFIX,
};
