//! Reading the file-list document that names the input files.

use crate::error::{Result, UpsetError};
use std::fs;
use std::path::{Path, PathBuf};

/// Read a file list: one input path per line.
///
/// Line endings and surrounding whitespace are stripped and blank lines are
/// ignored. Paths are returned in document order.
pub fn read_file_list<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| UpsetError::input(path, e))?;
    Ok(parse_file_list(&content))
}

/// Parse file-list text into paths.
pub fn parse_file_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_tolerant() {
        let paths = parse_file_list("a.tsv\n\n  b.tsv  \r\n\t\nc.tsv");
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.tsv"),
                PathBuf::from("b.tsv"),
                PathBuf::from("c.tsv")
            ]
        );
    }

    #[test]
    fn test_read_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "../results/cmp1.DE.tsv").unwrap();
        writeln!(file, "../results/cmp2.DE.tsv").unwrap();
        file.flush().unwrap();

        let paths = read_file_list(file.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1], PathBuf::from("../results/cmp2.DE.tsv"));
    }

    #[test]
    fn test_missing_list() {
        let err = read_file_list("/nonexistent/list.txt").unwrap_err();
        match err {
            UpsetError::Input { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/list.txt")),
            other => panic!("expected input error, got {:?}", other),
        }
    }
}
