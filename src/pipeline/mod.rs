//! Pipeline configuration and execution.

mod config;
mod runner;

pub use config::{InputMode, OutputConfig, PipelineConfig};
pub use runner::{
    build_de_sets, build_list_sets, run_de_files, Pipeline, PipelineResult, WrittenOutputs,
};
