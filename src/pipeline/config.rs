//! Run configuration, serializable to YAML.

use crate::classify::{DE_FILE_PATTERN, RAW_LIST_PATTERN};
use crate::error::{Result, UpsetError};
use crate::export::{delimiter_byte, ColumnLabels, PlotOptions};
use crate::parse::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the input sets come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputMode {
    /// File list of DE result files; each yields an up and a down set.
    DeFiles { file_list: PathBuf },
    /// File list of plain gene lists; each yields one set.
    RawLists { file_list: PathBuf },
}

impl InputMode {
    /// Select the mode from the two mutually exclusive inputs.
    ///
    /// Exactly one of `de_files` and `raw_lists` must be given.
    pub fn from_options(de_files: Option<PathBuf>, raw_lists: Option<PathBuf>) -> Result<Self> {
        match (de_files, raw_lists) {
            (Some(file_list), None) => Ok(Self::DeFiles { file_list }),
            (None, Some(file_list)) => Ok(Self::RawLists { file_list }),
            (Some(_), Some(_)) => Err(UpsetError::Configuration(
                "Please select either DE files or lists of strings, not both".to_string(),
            )),
            (None, None) => Err(UpsetError::Configuration(
                "Please provide a file list of DE files or of gene lists".to_string(),
            )),
        }
    }

    /// Path of the file-list document.
    pub fn file_list(&self) -> &Path {
        match self {
            Self::DeFiles { file_list } | Self::RawLists { file_list } => file_list,
        }
    }

    /// Default membership table path for this mode.
    pub fn default_table_path(&self) -> PathBuf {
        match self {
            Self::DeFiles { .. } => PathBuf::from("UpSet_genes_DE.tsv"),
            Self::RawLists { .. } => PathBuf::from("UpSet_genes_lists.tsv"),
        }
    }

    /// Default set-name strip pattern for this mode.
    pub fn default_name_pattern(&self) -> &'static str {
        match self {
            Self::DeFiles { .. } => DE_FILE_PATTERN,
            Self::RawLists { .. } => RAW_LIST_PATTERN,
        }
    }

    /// Short mode name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DeFiles { .. } => "DE files",
            Self::RawLists { .. } => "gene lists",
        }
    }
}

/// Output locations and formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Membership table path; the mode default when unset.
    pub table_path: Option<PathBuf>,
    /// Field delimiter for written tables.
    pub delimiter: char,
    /// Header style for set columns.
    pub column_labels: ColumnLabels,
    /// Optional subset-count table.
    pub subset_table_path: Option<PathBuf>,
    /// Whether to write plot data for the external renderer.
    pub write_plot_data: bool,
    /// Plot data path; `<image_path>.json` when unset.
    pub plot_data_path: Option<PathBuf>,
    /// Presentation options passed through to the renderer.
    pub plot: PlotOptions,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_path: None,
            delimiter: '\t',
            column_labels: ColumnLabels::SetName,
            subset_table_path: None,
            write_plot_data: true,
            plot_data_path: None,
            plot: PlotOptions::default(),
        }
    }
}

fn default_threshold() -> f64 {
    0.0
}

fn default_parallel() -> bool {
    true
}

/// Complete configuration of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name of the run, used in logs.
    #[serde(default = "default_name")]
    pub name: String,
    /// Input mode and file list.
    pub mode: InputMode,
    /// DE file parsing options (ignored for gene lists).
    #[serde(default)]
    pub parse: ParseOptions,
    /// Fold-change threshold; strictly greater is upregulated.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Set-name strip pattern; the mode default when unset.
    #[serde(default)]
    pub name_pattern: Option<String>,
    /// Parse input files in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_name() -> String {
    "upset".to_string()
}

impl PipelineConfig {
    /// Create a configuration with defaults for the given mode.
    pub fn new(mode: InputMode) -> Self {
        Self {
            name: default_name(),
            mode,
            parse: ParseOptions::default(),
            threshold: default_threshold(),
            name_pattern: None,
            parallel: default_parallel(),
            output: OutputConfig::default(),
        }
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(UpsetError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(UpsetError::from)
    }

    /// Set the run name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the classification threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set a custom set-name strip pattern.
    pub fn with_name_pattern(mut self, pattern: &str) -> Self {
        self.name_pattern = Some(pattern.to_string());
        self
    }

    /// Enable or disable parallel parsing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the membership table path.
    pub fn with_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.table_path = Some(path.into());
        self
    }

    /// Set the output settings.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Effective set-name strip pattern.
    pub fn effective_name_pattern(&self) -> &str {
        self.name_pattern
            .as_deref()
            .unwrap_or_else(|| self.mode.default_name_pattern())
    }

    /// Effective membership table path.
    pub fn effective_table_path(&self) -> PathBuf {
        self.output
            .table_path
            .clone()
            .unwrap_or_else(|| self.mode.default_table_path())
    }

    /// Check settings that can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.mode, InputMode::DeFiles { .. }) {
            self.parse.validate()?;
        }
        if !self.threshold.is_finite() {
            return Err(UpsetError::Configuration(format!(
                "Threshold must be finite, got {}",
                self.threshold
            )));
        }
        delimiter_byte(self.output.delimiter)?;
        regex::Regex::new(self.effective_name_pattern())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        let de = InputMode::from_options(Some("de.txt".into()), None).unwrap();
        assert_eq!(de.file_list(), Path::new("de.txt"));
        assert_eq!(de.default_table_path(), PathBuf::from("UpSet_genes_DE.tsv"));

        let lists = InputMode::from_options(None, Some("lists.txt".into())).unwrap();
        assert_eq!(lists.default_table_path(), PathBuf::from("UpSet_genes_lists.tsv"));
    }

    #[test]
    fn test_mode_both_or_neither_rejected() {
        assert!(matches!(
            InputMode::from_options(Some("a".into()), Some("b".into())),
            Err(UpsetError::Configuration(_))
        ));
        assert!(matches!(
            InputMode::from_options(None, None),
            Err(UpsetError::Configuration(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PipelineConfig::new(InputMode::DeFiles {
            file_list: "de_files.txt".into(),
        })
        .with_name("heat-shock")
        .with_threshold(1.0)
        .with_table_path("out.tsv");

        let yaml = config.to_yaml().unwrap();
        let loaded = PipelineConfig::from_yaml(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let yaml = "mode:\n  type: raw_lists\n  file_list: lists.txt\n";
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.threshold, 0.0);
        assert!(config.parallel);
        assert_eq!(config.parse, ParseOptions::default());
        assert_eq!(config.output.delimiter, '\t');
        assert_eq!(config.effective_name_pattern(), RAW_LIST_PATTERN);
        assert_eq!(config.effective_table_path(), PathBuf::from("UpSet_genes_lists.tsv"));
    }

    #[test]
    fn test_validate() {
        let mode = InputMode::DeFiles {
            file_list: "x".into(),
        };
        assert!(PipelineConfig::new(mode.clone()).validate().is_ok());
        assert!(PipelineConfig::new(mode.clone())
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(PipelineConfig::new(mode.clone())
            .with_name_pattern("[")
            .validate()
            .is_err());

        let mut config = PipelineConfig::new(mode);
        config.output.delimiter = 'ß';
        assert!(matches!(config.validate(), Err(UpsetError::Configuration(_))));
    }
}
