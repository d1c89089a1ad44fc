//! Counters for soft fallbacks and expansion volumes.

use std::collections::BTreeMap;

use serde::Serialize;
use tenor_core::TenorKind;
use tracing::warn;

use crate::expand::UnmappedTenor;

/// An unmapped compound tenor and the input row it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmappedTenorRecord {
    /// 1-based input row.
    pub row: usize,
    /// Raw compound code.
    pub tenor: String,
    /// Normalised lookup key that missed.
    pub normalized: String,
    /// Compound kind.
    pub kind: TenorKind,
}

/// Audit trail of one expansion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpansionAudit {
    /// Input rows processed.
    pub input_rows: usize,
    /// Expanded rows emitted.
    pub output_rows: usize,
    /// Input rows per tenor kind.
    pub rows_by_kind: BTreeMap<String, usize>,
    /// Compound tenors that fell back to literal treatment.
    pub unmapped_tenors: Vec<UnmappedTenorRecord>,
    /// Product labels absent from the product map, with row counts.
    pub unmapped_products: BTreeMap<String, usize>,
}

impl ExpansionAudit {
    /// Records one expanded input row.
    pub(crate) fn record_row(
        &mut self,
        row: usize,
        kind: TenorKind,
        emitted: usize,
        unmapped: &[UnmappedTenor],
        unmapped_product: Option<&str>,
    ) {
        self.input_rows += 1;
        self.output_rows += emitted;
        *self
            .rows_by_kind
            .entry(kind.as_str().to_string())
            .or_insert(0) += 1;

        for miss in unmapped {
            warn!(
                row,
                tenor = %miss.tenor,
                normalized = %miss.normalized,
                kind = %miss.kind,
                "Compound tenor outside mapping horizon, treating as literal month"
            );
            self.unmapped_tenors.push(UnmappedTenorRecord {
                row,
                tenor: miss.tenor.clone(),
                normalized: miss.normalized.clone(),
                kind: miss.kind,
            });
        }

        if let Some(product) = unmapped_product {
            let count = self
                .unmapped_products
                .entry(product.to_string())
                .or_insert(0);
            if *count == 0 {
                warn!(product, "Product label not in product map, passing through unchanged");
            }
            *count += 1;
        }
    }

    /// Expanded rows per input row.
    pub fn expansion_ratio(&self) -> f64 {
        if self.input_rows == 0 {
            0.0
        } else {
            self.output_rows as f64 / self.input_rows as f64
        }
    }

    /// True when any soft fallback occurred.
    pub fn has_soft_fallbacks(&self) -> bool {
        !self.unmapped_tenors.is_empty() || !self.unmapped_products.is_empty()
    }
}
