//! Pipeline runner: file list to sets, matrix, subset counts and exports.

use crate::aggregate::{aggregate_subsets, SubsetCounts};
use crate::classify::{classify_records, NameNormalizer};
use crate::data::{MembershipMatrix, NamedSet, SetCollection};
use crate::error::{Result, UpsetError};
use crate::export::{
    default_plot_data_path, delimiter_byte, write_matrix, write_subset_counts, ColumnLabels,
    PlotOptions, UpSetPlotData,
};
use crate::parse::{parse_de_file, read_file_list, read_gene_list, ParseOptions};
use crate::pipeline::{InputMode, PipelineConfig};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Apply `f` to every path, in parallel if requested. Results keep the order
/// of `paths`; any failure aborts the whole batch.
fn map_files<T, F>(paths: &[PathBuf], parallel: bool, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync + Send,
{
    if parallel {
        paths.par_iter().map(|p| f(p.as_path())).collect()
    } else {
        paths.iter().map(|p| f(p.as_path())).collect()
    }
}

/// Build the set collection for DE result files.
///
/// Each file contributes its upregulated then its downregulated set, in
/// file-list order.
pub fn build_de_sets(
    paths: &[PathBuf],
    options: &ParseOptions,
    normalizer: &NameNormalizer,
    threshold: f64,
    parallel: bool,
) -> Result<SetCollection> {
    let classified = map_files(paths, parallel, |path| {
        let table = parse_de_file(path, options)?;
        let comparison = normalizer.normalize(path);
        let classified = classify_records(&table, &comparison, threshold);
        debug!(
            comparison = %classified.comparison,
            n_up = classified.upregulated.len(),
            n_down = classified.downregulated.len(),
            "Classified comparison"
        );
        Ok(classified)
    })?;

    SetCollection::from_sets(classified.into_iter().flat_map(|c| c.into_sets()))
}

/// Build the set collection for plain gene lists, one set per file.
pub fn build_list_sets(
    paths: &[PathBuf],
    normalizer: &NameNormalizer,
    parallel: bool,
) -> Result<SetCollection> {
    let sets = map_files(paths, parallel, |path| {
        let members = read_gene_list(path)?;
        let set = NamedSet {
            name: normalizer.normalize(path),
            members,
        };
        if set.is_empty() {
            warn!(set = %set.name, "{} is empty", set.name);
        }
        Ok(set)
    })?;

    SetCollection::from_sets(sets)
}

/// In-memory result of a run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Sets in column order.
    pub sets: SetCollection,
    /// Element × set membership.
    pub matrix: MembershipMatrix,
    /// Counts per membership pattern.
    pub counts: SubsetCounts,
    /// Column labels used for export and plotting.
    pub set_labels: Vec<String>,
}

impl PipelineResult {
    /// Compute matrix and subset counts for ready-made sets.
    pub fn from_sets(sets: SetCollection, labels: ColumnLabels) -> Result<Self> {
        let set_labels: Vec<String> = sets.names().into_iter().map(|n| labels.apply(n)).collect();
        let mut seen = HashSet::new();
        if let Some(dup) = set_labels.iter().find(|l| !seen.insert(l.as_str())) {
            return Err(UpsetError::DuplicateSetName(dup.clone()));
        }

        let matrix = MembershipMatrix::from_sets(&sets);
        let counts = aggregate_subsets(&matrix);
        debug_assert_eq!(counts.total(), matrix.n_elements());

        Ok(Self {
            sets,
            matrix,
            counts,
            set_labels,
        })
    }

    /// Plot data for the external renderer.
    pub fn plot_data(&self, options: PlotOptions) -> UpSetPlotData {
        UpSetPlotData::new(&self.matrix, &self.counts, self.set_labels.clone(), options)
    }
}

/// Files written by [`Pipeline::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub table: PathBuf,
    pub subset_table: Option<PathBuf>,
    pub plot_data: Option<PathBuf>,
}

/// Runs the configured analysis.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from a configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read the file list and build the set collection.
    pub fn collect_sets(&self) -> Result<SetCollection> {
        self.config.validate()?;
        let normalizer = NameNormalizer::new(self.config.effective_name_pattern())?;

        let file_list = self.config.mode.file_list();
        info!(
            run = %self.config.name,
            mode = self.config.mode.name(),
            file_list = %file_list.display(),
            "Reading file list"
        );
        let paths = read_file_list(file_list)?;
        if paths.is_empty() {
            warn!(file_list = %file_list.display(), "File list contains no paths");
        }

        let sets = match &self.config.mode {
            InputMode::DeFiles { .. } => build_de_sets(
                &paths,
                &self.config.parse,
                &normalizer,
                self.config.threshold,
                self.config.parallel,
            )?,
            InputMode::RawLists { .. } => {
                build_list_sets(&paths, &normalizer, self.config.parallel)?
            }
        };

        info!(
            n_files = paths.len(),
            n_sets = sets.len(),
            n_empty = sets.empty_sets().len(),
            "Built gene sets"
        );
        Ok(sets)
    }

    /// Run the analysis without writing any file.
    pub fn analyze(&self) -> Result<PipelineResult> {
        let sets = self.collect_sets()?;
        let result = PipelineResult::from_sets(sets, self.config.output.column_labels)?;
        info!(
            n_genes = result.matrix.n_elements(),
            n_sets = result.matrix.n_sets(),
            n_patterns = result.counts.len(),
            "Built membership matrix"
        );
        Ok(result)
    }

    /// Run the analysis and write the configured outputs.
    pub fn run(&self) -> Result<(PipelineResult, WrittenOutputs)> {
        let result = self.analyze()?;
        let written = self.write_outputs(&result)?;
        Ok((result, written))
    }

    /// Write the membership table, and optionally subset counts and plot data.
    pub fn write_outputs(&self, result: &PipelineResult) -> Result<WrittenOutputs> {
        let output = &self.config.output;
        let delimiter = delimiter_byte(output.delimiter)?;

        let table = self.config.effective_table_path();
        write_matrix(&result.matrix, &table, delimiter, output.column_labels)?;
        info!(path = %table.display(), "Wrote membership table");

        let subset_table = match &output.subset_table_path {
            Some(path) => {
                write_subset_counts(
                    &result.counts,
                    result.matrix.set_names(),
                    path,
                    delimiter,
                    output.column_labels,
                )?;
                info!(path = %path.display(), "Wrote subset counts");
                Some(path.clone())
            }
            None => None,
        };

        let plot_data = if output.write_plot_data {
            let path = output
                .plot_data_path
                .clone()
                .unwrap_or_else(|| default_plot_data_path(&output.plot.image_path));
            result.plot_data(output.plot.clone()).write(&path)?;
            debug!(path = %path.display(), "Wrote plot data");
            Some(path)
        } else {
            None
        };

        Ok(WrittenOutputs {
            table,
            subset_table,
            plot_data,
        })
    }
}

/// Convenience function: run a DE-file analysis with default settings,
/// writing the membership table to `table_path`.
pub fn run_de_files(file_list: &Path, table_path: &Path) -> Result<PipelineResult> {
    let mut config = PipelineConfig::new(InputMode::DeFiles {
        file_list: file_list.to_path_buf(),
    })
    .with_table_path(table_path);
    config.output.write_plot_data = false;

    let (result, _) = Pipeline::new(config).run()?;
    Ok(result)
}
