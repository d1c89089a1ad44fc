//! # tenor_core: Tenor Vocabulary for Futures Delta Expansion
//!
//! ## Layer 1 (Foundation) Role
//!
//! tenor_core is the bottom layer of the tenorx workspace, providing:
//! - Contract-month alphabet and codes: `MonthCode`, `ContractMonth` (`month`)
//! - Chronological ordering of contract-month strings: `ChronoKey` (`month`)
//! - Tenor classification into a sum type: `Tenor`, `TenorKind` (`tenor`)
//! - Year-suffix canonicalisation: `normalize` (`normalize`)
//! - Compound-tenor lookup tables: `TenorMappings` (`mapping`)
//! - Product-label canonicalisation: `ProductMap` (`product`)
//! - Error types: `TenorError` (`error`)
//!
//! Everything here is pure and allocation-light; logging and aggregation
//! live in `tenor_risk`.
//!
//! ## Usage Examples
//!
//! ```rust
//! use tenor_core::{Resolution, Tenor, TenorKind, TenorMappings};
//!
//! let maps = TenorMappings::default();
//! let tenor = Tenor::parse("Cal2027").unwrap();
//! assert_eq!(tenor.kind(), TenorKind::Calendar);
//!
//! match maps.resolve(&tenor) {
//!     Resolution::Resolved(months) => assert_eq!(months.len(), 12),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod mapping;
pub mod month;
pub mod normalize;
pub mod product;
pub mod tenor;

pub use error::TenorError;
pub use mapping::{Resolution, TenorMappings, DEFAULT_SPAN_YEARS, DEFAULT_START_YEAR};
pub use month::{
    sort_chronologically, sort_chronologically_in_window, ChronoKey, ContractMonth, MonthCode,
};
pub use normalize::normalize;
pub use product::{is_canonical, ProductMap, CANONICAL_PRODUCTS};
pub use tenor::{Tenor, TenorKind};
