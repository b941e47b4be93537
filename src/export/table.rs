//! Tabular export of the membership matrix and subset counts.

use crate::aggregate::SubsetCounts;
use crate::data::{short_label, MembershipMatrix};
use crate::error::{Result, UpsetError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header of the identifier column.
pub const GENE_ID_HEADER: &str = "GeneID";

/// How set names appear in column headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnLabels {
    /// Full set names, e.g. `cmp_upregulated`.
    #[default]
    SetName,
    /// Shortened names, e.g. `cmp_up`.
    Short,
}

impl ColumnLabels {
    /// Header text for a set name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::SetName => name.to_string(),
            Self::Short => short_label(name),
        }
    }
}

/// Check that a delimiter is a single ASCII character and return its byte.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() && delimiter != '"' && delimiter != '\n' && delimiter != '\r' {
        Ok(delimiter as u8)
    } else {
        Err(UpsetError::Configuration(format!(
            "Delimiter must be a single ASCII character other than quote or newline, got {:?}",
            delimiter
        )))
    }
}

fn writer<W: Write>(out: W, delimiter: u8) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(out)
}

/// Write the membership matrix to any writer.
///
/// Header is `GeneID` followed by one column per set; one row per element in
/// matrix order; cells are `true` or `false`.
pub fn write_matrix_to<W: Write>(
    matrix: &MembershipMatrix,
    out: W,
    delimiter: u8,
    labels: ColumnLabels,
) -> Result<()> {
    let mut wtr = writer(out, delimiter);

    let mut header = Vec::with_capacity(matrix.n_sets() + 1);
    header.push(GENE_ID_HEADER.to_string());
    header.extend(matrix.set_names().iter().map(|n| labels.apply(n)));
    wtr.write_record(&header)?;

    for (element, pattern) in matrix.rows() {
        let mut record = Vec::with_capacity(pattern.len() + 1);
        record.push(element.to_string());
        record.extend(pattern.iter().map(|b| b.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the membership matrix to a file.
pub fn write_matrix<P: AsRef<Path>>(
    matrix: &MembershipMatrix,
    path: P,
    delimiter: u8,
    labels: ColumnLabels,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| UpsetError::output(path, e))?;
    write_matrix_to(matrix, file, delimiter, labels)
}

/// Write subset counts to any writer.
///
/// Header is the set names followed by `count`; one row per observed
/// pattern in ascending pattern order.
pub fn write_subset_counts_to<W: Write, S: AsRef<str>>(
    counts: &SubsetCounts,
    set_names: &[S],
    out: W,
    delimiter: u8,
    labels: ColumnLabels,
) -> Result<()> {
    let mut wtr = writer(out, delimiter);

    let mut header: Vec<String> = set_names.iter().map(|n| labels.apply(n.as_ref())).collect();
    header.push("count".to_string());
    wtr.write_record(&header)?;

    for (pattern, count) in counts.iter() {
        let mut record: Vec<String> = pattern.flags().iter().map(|b| b.to_string()).collect();
        record.push(count.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write subset counts to a file.
pub fn write_subset_counts<P: AsRef<Path>, S: AsRef<str>>(
    counts: &SubsetCounts,
    set_names: &[S],
    path: P,
    delimiter: u8,
    labels: ColumnLabels,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| UpsetError::output(path, e))?;
    write_subset_counts_to(counts, set_names, file, delimiter, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_subsets;
    use crate::data::{NamedSet, SetCollection};

    fn matrix() -> MembershipMatrix {
        let sets = SetCollection::from_sets(vec![
            NamedSet::from_members("c1_upregulated", ["g2", "g1"]),
            NamedSet::from_members("c1_downregulated", ["g3"]),
        ])
        .unwrap();
        MembershipMatrix::from_sets(&sets)
    }

    fn render(matrix: &MembershipMatrix, delimiter: u8, labels: ColumnLabels) -> String {
        let mut buf = Vec::new();
        write_matrix_to(matrix, &mut buf, delimiter, labels).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_matrix_layout() {
        let text = render(&matrix(), b'\t', ColumnLabels::SetName);
        assert_eq!(
            text,
            "GeneID\tc1_upregulated\tc1_downregulated\n\
             g1\ttrue\tfalse\n\
             g2\ttrue\tfalse\n\
             g3\tfalse\ttrue\n"
        );
    }

    #[test]
    fn test_short_labels_and_delimiter() {
        let text = render(&matrix(), b',', ColumnLabels::Short);
        assert!(text.starts_with("GeneID,c1_up,c1_down\n"));
    }

    #[test]
    fn test_empty_matrix_writes_header_only() {
        let empty = MembershipMatrix::from_sets(&SetCollection::new());
        assert_eq!(render(&empty, b'\t', ColumnLabels::SetName), "GeneID\n");
    }

    #[test]
    fn test_subset_counts_table() {
        let m = matrix();
        let counts = aggregate_subsets(&m);
        let mut buf = Vec::new();
        write_subset_counts_to(&counts, m.set_names(), &mut buf, b'\t', ColumnLabels::Short)
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "c1_up\tc1_down\tcount\nfalse\ttrue\t1\ntrue\tfalse\t2\n"
        );
    }

    #[test]
    fn test_delimiter_validation() {
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
        assert!(delimiter_byte('"').is_err());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("UpSet_genes.tsv");
        write_matrix(&matrix(), &path, b'\t', ColumnLabels::SetName).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_unwritable_path_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("UpSet_genes.tsv");
        match write_matrix(&matrix(), &path, b'\t', ColumnLabels::SetName) {
            Err(UpsetError::Output { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected output error, got {:?}", other),
        }
    }
}
