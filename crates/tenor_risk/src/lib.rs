//! # tenor_risk: Delta Expansion and Summary Aggregation
//!
//! ## Layer 2 (Engine) Role
//!
//! tenor_risk turns compressed-tenor position rows into per-contract-month
//! delta rows and aggregates them into a tenor × product matrix:
//! - Single-tenor and spread expansion with the leg allocation rule (`expand`)
//! - Row-level driver with sequential and rayon-parallel variants (`driver`)
//! - Soft-fallback audit trail (`audit`)
//! - Chronologically sorted summary matrix (`summary`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use tenor_risk::{DeltaSummary, Position, PositionExpander};
//!
//! let positions = vec![
//!     Position::new(-1400.0, "Q2-26/Q3-26", "HTT Rolls", "HTT_Rolls"),
//!     Position::new(100.0, "H6", "HTT", "HTT_Front"),
//! ];
//!
//! let output = PositionExpander::default().expand(&positions).unwrap();
//! let summary = DeltaSummary::from_rows(&output.rows);
//!
//! assert_eq!(summary.value("H6", "HTT"), Some(100.0));
//! assert_eq!(summary.value("J6", "HTT"), Some(-1400.0));
//! assert_eq!(summary.value("N6", "HTT"), Some(1400.0));
//! ```

#![deny(missing_docs)]

pub mod audit;
pub mod driver;
pub mod error;
pub mod expand;
pub mod position;
pub mod summary;

pub use audit::{ExpansionAudit, UnmappedTenorRecord};
pub use driver::{ExpansionOutput, PositionExpander, RowExpansion};
pub use error::ExpansionError;
pub use expand::{
    allocate_spread, expand_spread, expand_tenor, Expansion, LegStructure, MonthDelta,
    TenorExpander, UnmappedTenor,
};
pub use position::{ExpandedDelta, Position};
pub use summary::{DeltaSummary, SummaryRow};
