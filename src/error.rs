//! Error types for the de-upset library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum UpsetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read input file '{}': {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write output file '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row in '{}' at line {line_number}: '{line}'", .path.display())]
    Parse {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Duplicate set name '{0}'")]
    DuplicateSetName(String),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid name pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UpsetError {
    /// Wrap an I/O failure on a named input file.
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }

    /// Wrap an I/O failure on a named output file.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, UpsetError>;
