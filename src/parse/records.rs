//! Parsing of per-comparison differential expression result files.

use crate::data::{GeneRecord, RecordTable};
use crate::error::{Result, UpsetError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// What to do with a row whose fold-change field is missing or not numeric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnMalformed {
    /// Log a warning with the file name and row content, then continue.
    #[default]
    SkipRow,
    /// Fail the whole run with a parse error.
    AbortFile,
}

/// Options controlling how a DE result file is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Zero-based column holding the gene identifier.
    pub id_column: usize,
    /// Zero-based column holding the signed fold-change.
    pub fold_change_column: usize,
    /// Lines containing any of these substrings are treated as headers.
    pub header_markers: Vec<String>,
    /// Policy for malformed rows.
    pub on_malformed: OnMalformed,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            id_column: 0,
            fold_change_column: 1,
            header_markers: vec!["Geneid".to_string(), "regulated".to_string()],
            on_malformed: OnMalformed::SkipRow,
        }
    }
}

impl ParseOptions {
    /// Set the fold-change column.
    pub fn with_fold_change_column(mut self, column: usize) -> Self {
        self.fold_change_column = column;
        self
    }

    /// Set the identifier column.
    pub fn with_id_column(mut self, column: usize) -> Self {
        self.id_column = column;
        self
    }

    /// Set the malformed-row policy.
    pub fn with_on_malformed(mut self, policy: OnMalformed) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Check the options are usable.
    pub fn validate(&self) -> Result<()> {
        if self.id_column == self.fold_change_column {
            return Err(UpsetError::Configuration(format!(
                "Identifier and fold-change columns must differ (both are {})",
                self.id_column
            )));
        }
        Ok(())
    }

    /// Check whether a line is a header or label row.
    pub fn is_header(&self, line: &str) -> bool {
        self.header_markers.iter().any(|m| line.contains(m.as_str()))
    }
}

/// Extract the gene record from one data line.
///
/// Returns `None` if either field is missing, the identifier is empty, or the
/// fold-change is not a number.
fn parse_line(line: &str, options: &ParseOptions) -> Option<GeneRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    let identifier = fields.get(options.id_column)?.trim();
    if identifier.is_empty() {
        return None;
    }
    let fold_change: f64 = fields.get(options.fold_change_column)?.trim().parse().ok()?;
    if fold_change.is_nan() {
        return None;
    }
    Some(GeneRecord::new(identifier, fold_change))
}

/// Apply the malformed-row policy to a rejected row.
///
/// Returns `Ok(())` when the row is skipped, or a parse error naming the file
/// and line under [`OnMalformed::AbortFile`].
fn reject_row(
    path: &Path,
    line_number: usize,
    line: &str,
    reason: &str,
    policy: OnMalformed,
) -> Result<()> {
    match policy {
        OnMalformed::SkipRow => {
            warn!(
                file = %path.display(),
                line_number,
                "Skipping row with {}: '{}'",
                reason,
                line
            );
            Ok(())
        }
        OnMalformed::AbortFile => Err(UpsetError::Parse {
            path: path.to_path_buf(),
            line_number,
            line: line.to_string(),
        }),
    }
}

/// Parse one DE result file into a record table.
///
/// Header rows are recognized by content rather than position, so files with
/// interleaved label lines are handled. Blank lines are ignored. When an
/// identifier appears more than once, the last well-formed occurrence wins.
/// Rows that are not valid UTF-8 fall under the malformed-row policy.
pub fn parse_de_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<RecordTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| UpsetError::input(path, e))?;
    let reader = BufReader::new(file);

    let mut table = RecordTable::new(path);
    let mut n_skipped = 0usize;

    for (line_idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|e| UpsetError::input(path, e))?;
        let line_number = line_idx + 1;

        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                let lossy = String::from_utf8_lossy(e.as_bytes());
                reject_row(
                    path,
                    line_number,
                    lossy.trim_end_matches('\r'),
                    "invalid UTF-8",
                    options.on_malformed,
                )?;
                n_skipped += 1;
                continue;
            }
        };
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || options.is_header(line) {
            continue;
        }

        match parse_line(line, options) {
            Some(record) => {
                table.push(record);
            }
            None => {
                reject_row(
                    path,
                    line_number,
                    line,
                    "malformed fold-change",
                    options.on_malformed,
                )?;
                n_skipped += 1;
            }
        }
    }

    debug!(
        file = %path.display(),
        n_genes = table.len(),
        n_skipped,
        "Parsed DE file"
    );

    Ok(table)
}
