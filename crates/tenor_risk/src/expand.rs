//! Single-tenor and spread expansion.
//!
//! # Allocation rules
//!
//! A standalone compound tenor (quarterly, half, calendar) *replicates* the
//! full quantity into every contract month of the bundle: holding 1000 of
//! `Q2-26` means holding 1000 of each of `J6`, `K6` and `M6`.
//!
//! A spread `leg1/leg2` puts `+qty` on leg 1 and `-qty` on leg 2. When both
//! legs span the same number of months each month carries the full
//! magnitude. When they differ, only the leg with more months is divided
//! by its month count; the other leg keeps the full magnitude per month.
//!
//! | legs (n1 vs n2) | leg 1 per month | leg 2 per month |
//! |---|---|---|
//! | n1 == n2 | `sign * mag` | `-sign * mag` |
//! | n1 > n2 | `sign * mag / n1` | `-sign * mag` |
//! | n1 < n2 | `sign * mag` | `-sign * mag / n2` |

use serde::Serialize;
use tenor_core::{Resolution, Tenor, TenorError, TenorKind, TenorMappings};

/// A quantity assigned to one contract month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthDelta {
    /// Signed quantity.
    pub qty: f64,
    /// Contract-month code, or the literal tenor on a lookup miss.
    pub tenor: String,
}

impl MonthDelta {
    /// Creates a month delta.
    pub fn new(qty: f64, tenor: impl Into<String>) -> Self {
        Self {
            qty,
            tenor: tenor.into(),
        }
    }
}

/// A compound tenor that missed its mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmappedTenor {
    /// Raw compound code.
    pub tenor: String,
    /// Normalised lookup key.
    pub normalized: String,
    /// Compound kind.
    pub kind: TenorKind,
}

/// Ordered contract months of one non-spread tenor.
#[derive(Debug, Clone, PartialEq)]
pub struct LegStructure {
    /// Contract months in structural order.
    pub months: Vec<String>,
    /// Set when the tenor fell back to literal treatment.
    pub unmapped: Option<UnmappedTenor>,
}

impl LegStructure {
    /// Number of contract months in the leg.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// True when the leg has no months.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Result of expanding one tenor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expansion {
    /// Per-month deltas in structural order (leg 1 before leg 2).
    pub deltas: Vec<MonthDelta>,
    /// Soft lookup misses encountered.
    pub unmapped: Vec<UnmappedTenor>,
}

impl Expansion {
    /// Sum of all emitted quantities.
    pub fn net(&self) -> f64 {
        self.deltas.iter().map(|d| d.qty).sum()
    }
}

/// Per-month quantities for the two legs of a spread.
///
/// Returns `(leg1_qty, leg2_qty)` for leg sizes `n1` and `n2`.
///
/// # Examples
///
/// ```
/// use tenor_risk::expand::allocate_spread;
///
/// assert_eq!(allocate_spread(3, 3, -1400.0), (-1400.0, 1400.0));
/// assert_eq!(allocate_spread(1, 3, -120.0), (-120.0, 40.0));
/// assert_eq!(allocate_spread(12, 1, 60.0), (5.0, -60.0));
/// ```
pub fn allocate_spread(n1: usize, n2: usize, qty: f64) -> (f64, f64) {
    let sign = if qty >= 0.0 { 1.0 } else { -1.0 };
    let mag = qty.abs();

    if n1 > n2 {
        (sign * mag / n1 as f64, -sign * mag)
    } else if n2 > n1 {
        (sign * mag, -sign * mag / n2 as f64)
    } else {
        (sign * mag, -sign * mag)
    }
}

/// Expands tenors against a set of mapping tables.
#[derive(Debug, Clone, Copy)]
pub struct TenorExpander<'a> {
    mappings: &'a TenorMappings,
}

impl<'a> TenorExpander<'a> {
    /// Creates an expander over `mappings`.
    pub fn new(mappings: &'a TenorMappings) -> Self {
        Self { mappings }
    }

    /// Contract months of a non-spread tenor, without quantities.
    ///
    /// Outrights yield themselves; compound codes yield 3, 6 or 12 months,
    /// or themselves on a lookup miss.
    pub fn expand_structure(&self, tenor: &Tenor) -> LegStructure {
        let resolution = self.mappings.resolve(tenor);
        let months = resolution.months();
        let unmapped = match resolution {
            Resolution::Unmapped { code, normalized } => Some(UnmappedTenor {
                tenor: code,
                normalized,
                kind: tenor.kind(),
            }),
            Resolution::Outright(_) | Resolution::Resolved(_) => None,
        };

        LegStructure { months, unmapped }
    }

    /// Expands any parsed tenor, dispatching spreads to
    /// [`expand_spread`](Self::expand_spread).
    pub fn expand(&self, tenor: &Tenor, qty: f64) -> Expansion {
        match tenor.legs() {
            Some((leg1, leg2)) => self.expand_spread(leg1, leg2, qty),
            None => self.expand_single(tenor, qty),
        }
    }

    /// Replicates `qty` into every contract month of a non-spread tenor.
    pub fn expand_single(&self, tenor: &Tenor, qty: f64) -> Expansion {
        let structure = self.expand_structure(tenor);

        Expansion {
            deltas: structure
                .months
                .into_iter()
                .map(|month| MonthDelta::new(qty, month))
                .collect(),
            unmapped: structure.unmapped.into_iter().collect(),
        }
    }

    /// Allocates `qty` across both legs of a spread.
    pub fn expand_spread(&self, leg1: &Tenor, leg2: &Tenor, qty: f64) -> Expansion {
        let near = self.expand_structure(leg1);
        let far = self.expand_structure(leg2);
        let (near_qty, far_qty) = allocate_spread(near.len(), far.len(), qty);

        let deltas = near
            .months
            .into_iter()
            .map(|month| MonthDelta::new(near_qty, month))
            .chain(
                far.months
                    .into_iter()
                    .map(|month| MonthDelta::new(far_qty, month)),
            )
            .collect();

        Expansion {
            deltas,
            unmapped: near.unmapped.into_iter().chain(far.unmapped).collect(),
        }
    }
}

/// Expands a non-spread tenor string.
///
/// Spread strings are delegated to [`expand_spread`].
///
/// # Examples
///
/// ```
/// use tenor_core::TenorMappings;
/// use tenor_risk::expand::{expand_tenor, MonthDelta};
///
/// let maps = TenorMappings::default();
/// assert_eq!(
///     expand_tenor("Q2-26", 1000.0, &maps).unwrap(),
///     vec![
///         MonthDelta::new(1000.0, "J6"),
///         MonthDelta::new(1000.0, "K6"),
///         MonthDelta::new(1000.0, "M6"),
///     ]
/// );
/// ```
pub fn expand_tenor(
    tenor: &str,
    qty: f64,
    mappings: &TenorMappings,
) -> Result<Vec<MonthDelta>, TenorError> {
    let parsed = Tenor::parse(tenor)?;
    Ok(TenorExpander::new(mappings).expand(&parsed, qty).deltas)
}

/// Expands a `leg1/leg2` spread string.
///
/// # Errors
///
/// [`TenorError::InvalidSpreadFormat`] unless the string splits on `/`
/// into exactly two non-empty legs.
///
/// # Examples
///
/// ```
/// use tenor_core::TenorMappings;
/// use tenor_risk::expand::expand_spread;
///
/// let maps = TenorMappings::default();
/// let deltas = expand_spread("Q2-26/Q3-26", -1400.0, &maps).unwrap();
/// let net: f64 = deltas.iter().map(|d| d.qty).sum();
/// assert_eq!(deltas.len(), 6);
/// assert_eq!(net, 0.0);
/// ```
pub fn expand_spread(
    spread: &str,
    qty: f64,
    mappings: &TenorMappings,
) -> Result<Vec<MonthDelta>, TenorError> {
    match Tenor::parse(spread) {
        Ok(Tenor::Spread(leg1, leg2)) => {
            Ok(TenorExpander::new(mappings)
                .expand_spread(&leg1, &leg2, qty)
                .deltas)
        }
        Ok(_) => Err(TenorError::InvalidSpreadFormat {
            tenor: spread.to_string(),
            legs: 1,
        }),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn deltas(pairs: &[(f64, &str)]) -> Vec<MonthDelta> {
        pairs.iter().map(|(q, t)| MonthDelta::new(*q, *t)).collect()
    }

    #[test]
    fn test_allocate_equal_legs() {
        assert_eq!(allocate_spread(1, 1, 100.0), (100.0, -100.0));
        assert_eq!(allocate_spread(12, 12, -75.0), (-75.0, 75.0));
    }

    #[test]
    fn test_allocate_divides_only_larger_leg() {
        let (near, far) = allocate_spread(6, 3, 90.0);
        assert_relative_eq!(near, 15.0);
        assert_relative_eq!(far, -90.0);

        let (near, far) = allocate_spread(3, 12, -60.0);
        assert_relative_eq!(near, -60.0);
        assert_relative_eq!(far, 5.0);
    }

    #[test]
    fn test_allocate_zero_quantity() {
        let (near, far) = allocate_spread(1, 3, 0.0);
        assert_eq!(near, 0.0);
        assert_eq!(far, 0.0);
    }

    #[test]
    fn test_outright_identity() {
        let maps = TenorMappings::default();
        assert_eq!(
            expand_tenor("H6", 100.0, &maps).unwrap(),
            deltas(&[(100.0, "H6")])
        );
    }

    #[test]
    fn test_half_replicates() {
        let maps = TenorMappings::default();
        let out = expand_tenor("H2-2026", 100.0, &maps).unwrap();
        assert_eq!(
            out,
            deltas(&[
                (100.0, "N6"),
                (100.0, "Q6"),
                (100.0, "U6"),
                (100.0, "V6"),
                (100.0, "X6"),
                (100.0, "Z6"),
            ])
        );
    }

    #[test]
    fn test_calendar_replicates() {
        let maps = TenorMappings::default();
        let out = expand_tenor("Cal2027", -75.0, &maps).unwrap();
        assert_eq!(out.len(), 12);
        assert!(out.iter().all(|d| d.qty == -75.0));
        assert_eq!(out[0].tenor, "F7");
        assert_eq!(out[11].tenor, "Z7");
    }

    #[test]
    fn test_unmapped_compound_falls_back_to_literal() {
        let maps = TenorMappings::default();
        let tenor = Tenor::parse("Q1-2031").unwrap();
        let expansion = TenorExpander::new(&maps).expand(&tenor, 50.0);
        assert_eq!(expansion.deltas, deltas(&[(50.0, "Q1-2031")]));
        assert_eq!(
            expansion.unmapped,
            vec![UnmappedTenor {
                tenor: "Q1-2031".to_string(),
                normalized: "Q1-31".to_string(),
                kind: TenorKind::Quarterly,
            }]
        );
    }

    #[test]
    fn test_outright_spread() {
        let maps = TenorMappings::default();
        assert_eq!(
            expand_spread("Z6/Z7", 100.0, &maps).unwrap(),
            deltas(&[(100.0, "Z6"), (-100.0, "Z7")])
        );
    }

    #[test]
    fn test_equal_quarterly_spread() {
        let maps = TenorMappings::default();
        assert_eq!(
            expand_spread("Q2-26/Q3-26", -1400.0, &maps).unwrap(),
            deltas(&[
                (-1400.0, "J6"),
                (-1400.0, "K6"),
                (-1400.0, "M6"),
                (1400.0, "N6"),
                (1400.0, "Q6"),
                (1400.0, "U6"),
            ])
        );
    }

    #[test]
    fn test_outright_vs_quarterly_spread() {
        let maps = TenorMappings::default();
        let out = expand_spread("J6/Q2-26", -120.0, &maps).unwrap();
        assert_eq!(
            out,
            deltas(&[(-120.0, "J6"), (40.0, "J6"), (40.0, "K6"), (40.0, "M6")])
        );
    }

    #[test]
    fn test_calendar_vs_quarterly_spread_divides_leg_one() {
        let maps = TenorMappings::default();
        let out = expand_spread("Cal27/Q1-28", 120.0, &maps).unwrap();
        assert_eq!(out.len(), 15);
        let leg1: f64 = out[..12].iter().map(|d| d.qty).sum();
        assert_relative_eq!(out[0].qty, 10.0);
        assert_relative_eq!(leg1, 120.0, epsilon = 1e-9);
        assert!(out[12..].iter().all(|d| d.qty == -120.0));
    }

    #[test]
    fn test_spread_with_unmapped_leg_counts_as_one_month() {
        let maps = TenorMappings::default();
        let tenor = Tenor::parse("Cal30/Q1-26").unwrap();
        let expansion = TenorExpander::new(&maps).expand(&tenor, 30.0);
        // unmapped Cal30 collapses to one literal month, so leg 2 is larger
        assert_eq!(expansion.deltas[0], MonthDelta::new(30.0, "Cal30"));
        assert_relative_eq!(expansion.deltas[1].qty, -10.0);
        assert_eq!(expansion.unmapped.len(), 1);
    }

    #[test]
    fn test_expand_spread_rejects_bad_shapes() {
        let maps = TenorMappings::default();
        for bad in ["Z6/Z7/F8", "Z6/", "H6", ""] {
            assert!(
                matches!(
                    expand_spread(bad, 1.0, &maps),
                    Err(TenorError::InvalidSpreadFormat { .. })
                ),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_expand_tenor_delegates_spreads() {
        let maps = TenorMappings::default();
        assert_eq!(
            expand_tenor("Z6/Z7", 5.0, &maps).unwrap(),
            expand_spread("Z6/Z7", 5.0, &maps).unwrap()
        );
        assert!(expand_tenor("Z6//Z7", 5.0, &maps).is_err());
    }

    #[test]
    fn test_structure_lengths() {
        let maps = TenorMappings::default();
        let expander = TenorExpander::new(&maps);
        for (raw, len) in [("J6", 1), ("Q3-26", 3), ("H1-2027", 6), ("Cal28", 12)] {
            let tenor = Tenor::parse(raw).unwrap();
            assert_eq!(expander.expand_structure(&tenor).len(), len, "{}", raw);
        }
    }
}
