//! de-upset - UpSet set membership from differential expression results
//!
//! Command-line interface for building gene set membership tables and UpSet
//! plot data.

use clap::{Args, Parser, Subcommand, ValueEnum};
use de_upset::error::{Result, UpsetError};
use de_upset::export::{ColumnLabels, ImageFormat};
use de_upset::parse::OnMalformed;
use de_upset::pipeline::{InputMode, Pipeline, PipelineConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI-friendly image format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliImageFormat {
    Png,
    Svg,
    Pdf,
}

impl From<CliImageFormat> for ImageFormat {
    fn from(format: CliImageFormat) -> Self {
        match format {
            CliImageFormat::Png => ImageFormat::Png,
            CliImageFormat::Svg => ImageFormat::Svg,
            CliImageFormat::Pdf => ImageFormat::Pdf,
        }
    }
}

/// Create UpSet membership tables from DE files or lists of genes
#[derive(Parser)]
#[command(name = "de-upset")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the membership table and plot data
    Run(RunArgs),

    /// Print set sizes and subset counts without writing files
    Summary(RunArgs),

    /// Generate an example configuration file
    Example {
        /// Output path for the example YAML
        #[arg(short, long, default_value = "upset.yaml")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Pipeline configuration YAML (command-line flags override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File listing DE result files, one path per line
    #[arg(short = 'd', long = "de-files", visible_alias = "DE_files")]
    de_files: Option<PathBuf>,

    /// File listing plain gene lists, one path per line
    #[arg(short = 'l', long = "lists", visible_alias = "lists_of_strings")]
    lists: Option<PathBuf>,

    /// Zero-based column holding the gene identifier
    #[arg(long)]
    id_column: Option<usize>,

    /// Zero-based column holding the fold-change
    #[arg(short = 'f', long)]
    fold_change_column: Option<usize>,

    /// Fold-change threshold; genes strictly above it are upregulated
    #[arg(short, long, allow_hyphen_values = true)]
    threshold: Option<f64>,

    /// Regex stripped from file names to form set names
    #[arg(long)]
    name_pattern: Option<String>,

    /// Output path for the membership table
    #[arg(short = 'o', long)]
    table: Option<PathBuf>,

    /// Output path for the subset count table
    #[arg(long)]
    subset_table: Option<PathBuf>,

    /// Image path the external renderer should write
    #[arg(long)]
    image: Option<PathBuf>,

    /// Image format
    #[arg(long, value_enum)]
    format: Option<CliImageFormat>,

    /// Output path for the plot data (JSON, or YAML for .yaml/.yml)
    #[arg(long)]
    plot_data: Option<PathBuf>,

    /// Do not write plot data
    #[arg(long)]
    no_plot_data: bool,

    /// Table field delimiter
    #[arg(long)]
    delimiter: Option<char>,

    /// Use short column labels (cmp_up / cmp_down)
    #[arg(long)]
    short_labels: bool,

    /// Abort on malformed fold-change values instead of skipping the row
    #[arg(long)]
    strict: bool,

    /// Parse input files one at a time
    #[arg(long)]
    sequential: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "de_upset=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Summary(args) => cmd_summary(args),
        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match e {
            UpsetError::Configuration(_) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

/// Build the effective configuration from an optional YAML file and flags.
fn resolve_config(args: RunArgs) -> Result<PipelineConfig> {
    let cli_mode = if args.de_files.is_some() || args.lists.is_some() {
        Some(InputMode::from_options(args.de_files, args.lists)?)
    } else {
        None
    };

    let mut config = match (&args.config, cli_mode) {
        (Some(path), mode) => {
            let yaml = std::fs::read_to_string(path).map_err(|e| UpsetError::input(path, e))?;
            let mut config = PipelineConfig::from_yaml(&yaml)?;
            if let Some(mode) = mode {
                config.mode = mode;
            }
            config
        }
        (None, Some(mode)) => PipelineConfig::new(mode),
        (None, None) => InputMode::from_options(None, None).map(PipelineConfig::new)?,
    };

    if let Some(column) = args.id_column {
        config.parse.id_column = column;
    }
    if let Some(column) = args.fold_change_column {
        config.parse.fold_change_column = column;
    }
    if args.strict {
        config.parse.on_malformed = OnMalformed::AbortFile;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(pattern) = args.name_pattern {
        config.name_pattern = Some(pattern);
    }
    if args.sequential {
        config.parallel = false;
    }

    let output = &mut config.output;
    if let Some(table) = args.table {
        output.table_path = Some(table);
    }
    if let Some(path) = args.subset_table {
        output.subset_table_path = Some(path);
    }
    if let Some(delimiter) = args.delimiter {
        output.delimiter = delimiter;
    }
    if args.short_labels {
        output.column_labels = ColumnLabels::Short;
    }
    if let Some(format) = args.format {
        output.plot.format = format.into();
    }
    match args.image {
        Some(image) => output.plot.image_path = image,
        None if args.format.is_some() => {
            output.plot.image_path =
                PathBuf::from(format!("UpSet_plot.{}", output.plot.format.extension()));
        }
        None => {}
    }
    output.plot.resolve_format();
    if let Some(path) = args.plot_data {
        output.plot_data_path = Some(path);
    }
    if args.no_plot_data {
        output.write_plot_data = false;
    }

    config.validate()?;
    Ok(config)
}

/// Run the full analysis and write outputs
fn cmd_run(args: RunArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let (result, written) = Pipeline::new(config).run()?;

    eprintln!(
        "Done! {} genes in {} sets, {} subsets",
        result.matrix.n_elements(),
        result.matrix.n_sets(),
        result.counts.len()
    );
    eprintln!("  Membership table: {}", written.table.display());
    if let Some(path) = &written.subset_table {
        eprintln!("  Subset counts:    {}", path.display());
    }
    if let Some(path) = &written.plot_data {
        eprintln!("  Plot data:        {}", path.display());
    }

    Ok(())
}

/// Print a text summary of set sizes and subset counts
fn cmd_summary(args: RunArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let result = Pipeline::new(config).analyze()?;

    println!("Gene Sets");
    println!("=========");
    println!();
    for (label, size) in result.set_labels.iter().zip(result.matrix.column_sizes()) {
        println!("  {:<40} {}", label, size);
    }
    println!();

    let labels = result.set_labels.as_slice();
    println!("Subsets (largest first)");
    println!("=======================");
    println!();
    for (pattern, count) in result.counts.sorted_by_size() {
        println!("  {:>6}  {}", count, pattern.label(labels));
    }
    println!();
    println!("Total genes: {}", result.counts.total());

    Ok(())
}

/// Generate example configuration
fn cmd_example(output_path: &Path) -> Result<()> {
    let mut config = PipelineConfig::new(InputMode::DeFiles {
        file_list: PathBuf::from("de_files.txt"),
    })
    .with_name("example-de")
    .with_threshold(0.0)
    .with_table_path("UpSet_genes_DE.tsv");
    config.output.subset_table_path = Some(PathBuf::from("UpSet_subsets.tsv"));

    let yaml = config.to_yaml()?;
    std::fs::write(output_path, &yaml).map_err(|e| UpsetError::output(output_path, e))?;
    info!(path = %output_path.display(), "Wrote example configuration");
    println!("{}", yaml);

    Ok(())
}
