//! Derivation of comparison names from input file paths.

use crate::error::Result;
use regex::Regex;
use std::path::Path;

/// Strip pattern for DE result files: everything from the first dot, so
/// compound suffixes such as `.DE.annotated.tsv` are removed entirely.
pub const DE_FILE_PATTERN: &str = r"\..*$";

/// Strip pattern for raw gene lists: the annotated-orthology suffix used by
/// the project's comparison files, or otherwise the last extension.
pub const RAW_LIST_PATTERN: &str =
    r"\.P1e-3_C2\.DE\.annotated\.plus_orthology\.sorted.*$|\.[^.]*$";

/// Turns a file path into a comparison name.
///
/// Directory components (including `../` segments) are dropped, then the
/// first match of the strip pattern is removed from the file name.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    strip: Regex,
}

impl NameNormalizer {
    /// Create a normalizer with a custom strip pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            strip: Regex::new(pattern)?,
        })
    }

    /// Normalizer for DE result files.
    pub fn for_de_files() -> Result<Self> {
        Self::new(DE_FILE_PATTERN)
    }

    /// Normalizer for raw gene lists.
    pub fn for_raw_lists() -> Result<Self> {
        Self::new(RAW_LIST_PATTERN)
    }

    /// The strip pattern in use.
    pub fn pattern(&self) -> &str {
        self.strip.as_str()
    }

    /// Derive the comparison name for a path.
    ///
    /// Falls back to the file stem if stripping leaves nothing (e.g. dotfiles).
    pub fn normalize(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let stripped = self.strip.replace(&file_name, "");
        if !stripped.is_empty() {
            return stripped.into_owned();
        }

        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(file_name)
    }
}
