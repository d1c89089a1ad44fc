//! Tenor × product delta summary.
//!
//! Groups expanded rows by (contract month, mapped product), sums the
//! quantities and pivots into a matrix whose rows are sorted
//! chronologically and whose columns follow the canonical product order.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tenor_core::{is_canonical, sort_chronologically_in_window, TenorMappings, CANONICAL_PRODUCTS};
use tracing::{info, warn};

use crate::position::ExpandedDelta;

/// One summary row: a contract month and its per-product sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Contract-month code.
    pub tenor: String,
    /// Sums in column order; zero where no rows contributed.
    pub values: Vec<f64>,
}

/// Pivoted delta summary.
///
/// Columns are the canonical products present in the input, in the fixed
/// order `HTT, HOUBR, CLBR, WDF, LH`, followed by any pass-through product
/// labels in alphabetical order. Keeping those extra columns departs from
/// the legacy report, which dropped them; here the matrix total always
/// equals the expanded total.
///
/// Rows sort by [`ChronoKey`](tenor_core::ChronoKey). Use
/// [`DeltaSummary::from_rows_in_horizon`] when the mapping horizon crosses
/// a decade.
///
/// # Examples
///
/// ```
/// use tenor_risk::{DeltaSummary, Position, PositionExpander};
///
/// let output = PositionExpander::default()
///     .expand(&[
///         Position::new(100.0, "Z6/Z7", "CLBR Boxes", "Rolls"),
///         Position::new(50.0, "Z6", "HTT", "Front"),
///     ])
///     .unwrap();
/// let summary = DeltaSummary::from_rows(&output.rows);
///
/// assert_eq!(summary.products(), ["HTT", "CLBR"]);
/// assert_eq!(summary.value("Z6", "CLBR"), Some(100.0));
/// assert_eq!(summary.value("Z7", "HTT"), Some(0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeltaSummary {
    products: Vec<String>,
    rows: Vec<SummaryRow>,
}

impl DeltaSummary {
    /// Aggregates expanded rows into the summary matrix.
    pub fn from_rows(rows: &[ExpandedDelta]) -> Self {
        Self::aggregate(rows, 2000)
    }

    /// Aggregates with year digits resolved inside the horizon of
    /// `mappings`, so `F0` sorts after `Z9` for a 2028..=2030 horizon.
    pub fn from_rows_in_horizon(rows: &[ExpandedDelta], mappings: &TenorMappings) -> Self {
        Self::aggregate(rows, u32::from(mappings.year_window_start()))
    }

    fn aggregate(rows: &[ExpandedDelta], window_start: u32) -> Self {
        let mut cells: BTreeMap<(&str, &str), f64> = BTreeMap::new();
        let mut present: BTreeSet<&str> = BTreeSet::new();
        let mut tenors: Vec<&str> = Vec::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();

        for row in rows {
            *cells
                .entry((row.tenor.as_str(), row.mapped_product.as_str()))
                .or_insert(0.0) += row.qty;
            present.insert(row.mapped_product.as_str());
            if seen.insert(row.tenor.as_str()) {
                tenors.push(row.tenor.as_str());
            }
        }

        let mut products: Vec<String> = CANONICAL_PRODUCTS
            .iter()
            .filter(|p| present.contains(*p))
            .map(|p| p.to_string())
            .collect();
        let extras: Vec<&str> = present.iter().copied().filter(|p| !is_canonical(p)).collect();
        if !extras.is_empty() {
            warn!(
                products = ?extras,
                "Non-canonical products appended as extra summary columns"
            );
            products.extend(extras.iter().map(|p| p.to_string()));
        }

        sort_chronologically_in_window(&mut tenors, window_start);

        let rows: Vec<SummaryRow> = tenors
            .iter()
            .map(|tenor| SummaryRow {
                tenor: tenor.to_string(),
                values: products
                    .iter()
                    .map(|p| cells.get(&(*tenor, p.as_str())).copied().unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        info!(
            tenors = rows.len(),
            products = products.len(),
            "Delta summary built"
        );

        Self { products, rows }
    }

    /// Column headers.
    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// Rows in chronological order.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Row labels in chronological order.
    pub fn tenors(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.tenor.as_str())
    }

    /// True when no rows were aggregated.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value; `None` when the tenor or product is not in the matrix.
    pub fn value(&self, tenor: &str, product: &str) -> Option<f64> {
        let col = self.products.iter().position(|p| p == product)?;
        self.rows
            .iter()
            .find(|r| r.tenor == tenor)
            .map(|r| r.values[col])
    }

    /// Column sum; `None` for an absent product.
    pub fn column_total(&self, product: &str) -> Option<f64> {
        let col = self.products.iter().position(|p| p == product)?;
        Some(self.rows.iter().map(|r| r.values[col]).sum())
    }

    /// Sum over the whole matrix.
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().flat_map(|r| r.values.iter()).sum()
    }
}
