//! # adapter_loader: Position Input and Report Output
//!
//! Adapter layer between tabular files and the expansion engine.
//!
//! ## Modules
//!
//! - [`positions`]: `Qty,Tenor,Product,Strategy` CSV reader
//! - [`sink`]: expanded table, summary matrix and JSON audit writers
//! - [`error`]: [`LoaderError`]

pub mod error;
pub mod positions;
pub mod sink;

pub use error::LoaderError;
pub use positions::{load_positions, read_positions};
pub use sink::{
    write_expanded, write_expanded_file, write_report, write_report_file, write_summary,
    write_summary_file, ColumnTotal, RunReport,
};
