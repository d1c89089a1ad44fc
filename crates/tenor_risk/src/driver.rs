//! Position expansion driver.
//!
//! Maps each input row's product, classifies its tenor, expands it and
//! flattens the per-month deltas into one output table. Rows are
//! independent, so the parallel variant produces the same output in the
//! same order as the sequential one.

use rayon::prelude::*;
use tenor_core::{ProductMap, Tenor, TenorKind, TenorMappings};
use tracing::{debug, info};

use crate::audit::ExpansionAudit;
use crate::error::ExpansionError;
use crate::expand::{TenorExpander, UnmappedTenor};
use crate::position::{ExpandedDelta, Position};

/// Expanded table plus its audit trail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionOutput {
    /// One row per (input position, expanded month).
    pub rows: Vec<ExpandedDelta>,
    /// Volumes and soft fallbacks.
    pub audit: ExpansionAudit,
}

/// Expansion of a single input row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowExpansion {
    /// 1-based input row.
    pub row: usize,
    /// Tenor category of the row.
    pub kind: TenorKind,
    /// Emitted rows.
    pub rows: Vec<ExpandedDelta>,
    /// Soft tenor misses in this row.
    pub unmapped: Vec<UnmappedTenor>,
    /// Set when the product label had no alias.
    pub unmapped_product: Option<String>,
}

/// Expands position rows into per-contract-month deltas.
///
/// # Examples
///
/// ```
/// use tenor_risk::{Position, PositionExpander};
///
/// let expander = PositionExpander::default();
/// let output = expander
///     .expand(&[Position::new(1000.0, "Q2-26", "HTTMID", "Longhorn")])
///     .unwrap();
///
/// assert_eq!(output.rows.len(), 3);
/// assert!(output.rows.iter().all(|r| r.mapped_product == "LH"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PositionExpander {
    mappings: TenorMappings,
    products: ProductMap,
    strict: bool,
}

impl PositionExpander {
    /// Creates a lenient expander.
    pub fn new(mappings: TenorMappings, products: ProductMap) -> Self {
        Self {
            mappings,
            products,
            strict: false,
        }
    }

    /// Escalates unmapped compound tenors to [`ExpansionError::UnmappedTenor`].
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Mapping tables in use.
    pub fn mappings(&self) -> &TenorMappings {
        &self.mappings
    }

    /// Product map in use.
    pub fn products(&self) -> &ProductMap {
        &self.products
    }

    /// Expands one row. `row` is the 1-based input row number.
    pub fn expand_row(&self, row: usize, position: &Position) -> Result<RowExpansion, ExpansionError> {
        let tenor = Tenor::parse(&position.tenor)
            .map_err(|source| ExpansionError::Tenor { row, source })?;

        let expansion = TenorExpander::new(&self.mappings).expand(&tenor, position.qty);

        if self.strict {
            if let Some(miss) = expansion.unmapped.first() {
                return Err(ExpansionError::UnmappedTenor {
                    row,
                    tenor: miss.tenor.clone(),
                    normalized: miss.normalized.clone(),
                });
            }
        }

        let mapped_product = self.products.map(&position.product);
        let rows: Vec<ExpandedDelta> = expansion
            .deltas
            .into_iter()
            .map(|delta| ExpandedDelta {
                qty: delta.qty,
                tenor: delta.tenor,
                product: position.product.clone(),
                mapped_product: mapped_product.to_string(),
                strategy: position.strategy.clone(),
            })
            .collect();

        debug!(
            row,
            tenor = %position.tenor,
            kind = %tenor.kind(),
            months = rows.len(),
            "Expanded position"
        );

        Ok(RowExpansion {
            row,
            kind: tenor.kind(),
            rows,
            unmapped: expansion.unmapped,
            unmapped_product: (!self.products.contains(&position.product))
                .then(|| position.product.clone()),
        })
    }

    /// Expands every row, stopping at the first structural error.
    pub fn expand(&self, positions: &[Position]) -> Result<ExpansionOutput, ExpansionError> {
        let expansions = positions
            .iter()
            .enumerate()
            .map(|(i, position)| self.expand_row(i + 1, position))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::merge(expansions))
    }

    /// Expands rows in parallel with rayon.
    ///
    /// Output order and the reported error (the lowest failing row) match
    /// [`expand`](Self::expand).
    pub fn expand_par(&self, positions: &[Position]) -> Result<ExpansionOutput, ExpansionError> {
        let results: Vec<Result<RowExpansion, ExpansionError>> = positions
            .par_iter()
            .enumerate()
            .map(|(i, position)| self.expand_row(i + 1, position))
            .collect();

        let expansions = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::merge(expansions))
    }

    fn merge(expansions: Vec<RowExpansion>) -> ExpansionOutput {
        let mut output = ExpansionOutput::default();

        for expansion in expansions {
            output.audit.record_row(
                expansion.row,
                expansion.kind,
                expansion.rows.len(),
                &expansion.unmapped,
                expansion.unmapped_product.as_deref(),
            );
            output.rows.extend(expansion.rows);
        }

        info!(
            input_rows = output.audit.input_rows,
            output_rows = output.audit.output_rows,
            unmapped_tenors = output.audit.unmapped_tenors.len(),
            unmapped_products = output.audit.unmapped_products.len(),
            "Position expansion complete"
        );

        output
    }
}
