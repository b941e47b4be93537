//! Reading plain gene lists for raw-list mode.

use crate::error::{Result, UpsetError};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Read a gene list: one identifier per line.
///
/// Only the first tab-separated field of each line is used. Blank lines and
/// lines starting with `#` are ignored. Duplicates collapse.
pub fn read_gene_list<P: AsRef<Path>>(path: P) -> Result<BTreeSet<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| UpsetError::input(path, e))?;
    Ok(parse_gene_list(&content))
}

/// Parse gene-list text into identifiers.
pub fn parse_gene_list(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split('\t').next())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gene_list() {
        let genes = parse_gene_list("# selected genes\ng2\ng1\textra\n\ng2\n");
        let genes: Vec<&str> = genes.iter().map(String::as_str).collect();
        assert_eq!(genes, vec!["g1", "g2"]);
    }

    #[test]
    fn test_missing_list_file() {
        assert!(matches!(
            read_gene_list("/nonexistent/genes.txt"),
            Err(UpsetError::Input { .. })
        ));
    }
}
