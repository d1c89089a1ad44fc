//! Input position rows and expanded delta rows.
//!
//! Serde names match the tabular column headers (`Qty`, `Tenor`, ...).

use serde::{Deserialize, Serialize};

/// One input position in compressed tenor notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Signed quantity.
    #[serde(rename = "Qty")]
    pub qty: f64,
    /// Tenor string, e.g. `H6`, `Q2-26`, `J6/Q2-26`.
    #[serde(rename = "Tenor")]
    pub tenor: String,
    /// Raw product label.
    #[serde(rename = "Product")]
    pub product: String,
    /// Strategy name.
    #[serde(rename = "Strategy")]
    pub strategy: String,
}

impl Position {
    /// Creates a position.
    pub fn new(
        qty: f64,
        tenor: impl Into<String>,
        product: impl Into<String>,
        strategy: impl Into<String>,
    ) -> Self {
        Self {
            qty,
            tenor: tenor.into(),
            product: product.into(),
            strategy: strategy.into(),
        }
    }
}

/// One per-contract-month delta produced by expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedDelta {
    /// Signed per-month quantity.
    #[serde(rename = "Qty")]
    pub qty: f64,
    /// Contract-month code (or a literal fallback tenor).
    #[serde(rename = "Tenor")]
    pub tenor: String,
    /// Original product label.
    #[serde(rename = "Product")]
    pub product: String,
    /// Canonical product.
    #[serde(rename = "Mapped_Product")]
    pub mapped_product: String,
    /// Strategy name.
    #[serde(rename = "Strategy")]
    pub strategy: String,
}
