//! Turning parsed comparisons into named up/down gene sets.

pub mod naming;
pub mod threshold;

pub use naming::{NameNormalizer, DE_FILE_PATTERN, RAW_LIST_PATTERN};
pub use threshold::{classify_records, ClassifiedComparison};
