//! Plot data handed to an external UpSet renderer.
//!
//! The crate does not draw images. It exports the set names, the observed
//! subset patterns with their counts, and the presentation options, so any
//! UpSet plotting tool can render them.

use crate::aggregate::SubsetCounts;
use crate::data::MembershipMatrix;
use crate::error::{Result, UpsetError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Image format requested from the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl ImageFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// Parse a format name (case-insensitive).
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            other => Err(UpsetError::Configuration(format!(
                "Unknown image format '{}': expected png, svg or pdf",
                other
            ))),
        }
    }

    /// Format named by a path's extension, if it is a known one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| Self::parse(e).ok())
    }
}

/// Plot orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Presentation options for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Where the renderer should write the image.
    pub image_path: PathBuf,
    /// Image format.
    pub format: ImageFormat,
    /// Plot orientation.
    pub orientation: Orientation,
    /// Print counts above bars.
    pub show_counts: bool,
    /// How subset sizes are computed by the renderer.
    pub subset_size: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("UpSet_plot.png"),
            format: ImageFormat::Png,
            orientation: Orientation::Horizontal,
            show_counts: true,
            subset_size: "sum".to_string(),
        }
    }
}

impl PlotOptions {
    /// Options for an image path, with the format taken from its extension.
    pub fn for_image(image_path: impl Into<PathBuf>) -> Self {
        let mut options = Self {
            image_path: image_path.into(),
            ..Self::default()
        };
        options.resolve_format();
        options
    }

    /// Align `format` with the image path. A recognized extension wins over
    /// the configured format; other paths keep it.
    pub fn resolve_format(&mut self) {
        if let Some(format) = ImageFormat::from_path(&self.image_path) {
            self.format = format;
        }
    }
}

/// One bar of the UpSet plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetEntry {
    /// Membership flags in set order.
    pub pattern: Vec<bool>,
    /// Included set names joined with `&`.
    pub label: String,
    /// Number of elements with exactly this membership.
    pub count: usize,
}

/// Everything an external renderer needs to draw the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpSetPlotData {
    /// Set names in column order.
    pub set_names: Vec<String>,
    /// Total members per set.
    pub set_sizes: Vec<usize>,
    /// Observed subsets in ascending pattern order.
    pub subsets: Vec<SubsetEntry>,
    /// Number of distinct elements.
    pub n_elements: usize,
    /// Presentation options.
    pub options: PlotOptions,
}

impl UpSetPlotData {
    /// Assemble plot data from the matrix, its subset counts and the display
    /// labels for each column.
    pub fn new(
        matrix: &MembershipMatrix,
        counts: &SubsetCounts,
        set_labels: Vec<String>,
        mut options: PlotOptions,
    ) -> Self {
        options.resolve_format();
        let subsets: Vec<SubsetEntry> = counts
            .iter()
            .map(|(pattern, count)| SubsetEntry {
                pattern: pattern.flags().to_vec(),
                label: pattern.label(set_labels.as_slice()),
                count,
            })
            .collect();

        Self {
            set_sizes: matrix.column_sizes(),
            set_names: set_labels,
            subsets,
            n_elements: matrix.n_elements(),
            options,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(UpsetError::from)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(UpsetError::from)
    }

    /// Load from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(UpsetError::from)
    }

    /// Write to a file; `.yaml`/`.yml` paths get YAML, anything else JSON.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let text = if is_yaml { self.to_yaml()? } else { self.to_json()? };
        std::fs::write(path, text).map_err(|e| UpsetError::output(path, e))?;
        Ok(())
    }
}

/// Default plot data path for an image path: the image path with `.json`
/// appended.
pub fn default_plot_data_path(image_path: &Path) -> PathBuf {
    let mut os = image_path.as_os_str().to_owned();
    os.push(".json");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_subsets;
    use crate::data::{NamedSet, SetCollection};

    fn plot_data() -> UpSetPlotData {
        let sets = SetCollection::from_sets(vec![
            NamedSet::from_members("a_up", ["g1", "g2"]),
            NamedSet::from_members("b_up", ["g2"]),
        ])
        .unwrap();
        let matrix = MembershipMatrix::from_sets(&sets);
        let counts = aggregate_subsets(&matrix);
        UpSetPlotData::new(
            &matrix,
            &counts,
            vec!["a_up".into(), "b_up".into()],
            PlotOptions::default(),
        )
    }

    #[test]
    fn test_plot_data_contents() {
        let data = plot_data();
        assert_eq!(data.set_sizes, vec![2, 1]);
        assert_eq!(data.n_elements, 2);
        assert_eq!(data.subsets.len(), 2);
        assert_eq!(data.subsets[1].label, "a_up&b_up");
        assert_eq!(data.subsets[1].count, 1);
        assert_eq!(data.options.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_json_roundtrip() {
        let data = plot_data();
        let json = data.to_json().unwrap();
        assert!(json.contains("\"format\": \"png\""));
        assert_eq!(UpSetPlotData::from_json(&json).unwrap(), data);
    }

    #[test]
    fn test_write_yaml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.yaml");
        plot_data().write(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("set_names:"));
    }

    #[test]
    fn test_format_follows_image_extension() {
        let options = PlotOptions::for_image("figures/overlap.svg");
        assert_eq!(options.format, ImageFormat::Svg);

        let mut options = PlotOptions {
            image_path: PathBuf::from("overlap.PDF"),
            ..PlotOptions::default()
        };
        options.resolve_format();
        assert_eq!(options.format, ImageFormat::Pdf);

        let mut options = PlotOptions {
            image_path: PathBuf::from("overlap"),
            format: ImageFormat::Svg,
            ..PlotOptions::default()
        };
        options.resolve_format();
        assert_eq!(options.format, ImageFormat::Svg);
    }

    #[test]
    fn test_plot_data_uses_image_format() {
        let sets = SetCollection::from_sets(vec![NamedSet::from_members("a_up", ["g1"])]).unwrap();
        let matrix = MembershipMatrix::from_sets(&sets);
        let counts = aggregate_subsets(&matrix);
        let options = PlotOptions {
            image_path: PathBuf::from("plot.svg"),
            ..PlotOptions::default()
        };
        let data = UpSetPlotData::new(&matrix, &counts, vec!["a_up".into()], options);
        assert_eq!(data.options.format, ImageFormat::Svg);
        assert!(data.to_json().unwrap().contains("\"format\": \"svg\""));
    }

    #[test]
    fn test_image_format_parse() {
        assert_eq!(ImageFormat::parse("SVG").unwrap(), ImageFormat::Svg);
        assert!(ImageFormat::parse("gif").is_err());
    }

    #[test]
    fn test_default_plot_data_path() {
        assert_eq!(
            default_plot_data_path(Path::new("out/UpSet_plot.png")),
            PathBuf::from("out/UpSet_plot.png.json")
        );
    }
}
