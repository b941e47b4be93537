//! Export of membership tables and plot data.

pub mod plot;
pub mod table;

pub use plot::{
    default_plot_data_path, ImageFormat, Orientation, PlotOptions, SubsetEntry, UpSetPlotData,
};
pub use table::{
    delimiter_byte, write_matrix, write_matrix_to, write_subset_counts, write_subset_counts_to,
    ColumnLabels, GENE_ID_HEADER,
};
