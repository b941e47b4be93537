//! Input readers: DE result files, file lists and plain gene lists.

pub mod file_list;
pub mod raw_list;
pub mod records;

pub use file_list::{parse_file_list, read_file_list};
pub use raw_list::{parse_gene_list, read_gene_list};
pub use records::{parse_de_file, OnMalformed, ParseOptions};
