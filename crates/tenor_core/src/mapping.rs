//! Compound-tenor mapping tables.
//!
//! Quarterly, half-year and calendar codes map to their ordered
//! constituent contract months for a fixed window of years. Tables are
//! built once per run and never mutated afterwards.

use std::collections::BTreeMap;

use crate::month::{ContractMonth, MonthCode};
use crate::normalize::normalize;
use crate::tenor::{Tenor, TenorKind};

/// Default first year of the mapping horizon.
pub const DEFAULT_START_YEAR: u16 = 2026;

/// Default number of years in the mapping horizon.
pub const DEFAULT_SPAN_YEARS: u8 = 3;

/// Outcome of resolving a tenor against the mapping tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Outright month, kept verbatim.
    Outright(&'a str),
    /// Compound code found in its table.
    Resolved(&'a [ContractMonth]),
    /// Compound code absent from its table (outside the horizon or malformed).
    Unmapped {
        /// The raw code.
        code: String,
        /// The normalised lookup key that missed.
        normalized: String,
    },
}

impl Resolution<'_> {
    /// Contract-month strings for this resolution.
    ///
    /// Outrights and misses yield the raw code as a single literal month.
    pub fn months(&self) -> Vec<String> {
        match self {
            Resolution::Outright(code) => vec![code.to_string()],
            Resolution::Resolved(months) => months.iter().map(|m| m.to_string()).collect(),
            Resolution::Unmapped { code, .. } => vec![code.to_string()],
        }
    }

    /// True when a compound code fell back to literal treatment.
    pub fn is_unmapped(&self) -> bool {
        matches!(self, Resolution::Unmapped { .. })
    }
}

/// Quarterly, half-year and calendar lookup tables.
///
/// # Examples
///
/// ```
/// use tenor_core::mapping::TenorMappings;
/// use tenor_core::tenor::TenorKind;
///
/// let maps = TenorMappings::default();
/// let q2: Vec<String> = maps
///     .lookup(TenorKind::Quarterly, "Q2-26")
///     .unwrap()
///     .iter()
///     .map(|m| m.to_string())
///     .collect();
/// assert_eq!(q2, vec!["J6", "K6", "M6"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenorMappings {
    start_year: u16,
    span_years: u8,
    quarterly: BTreeMap<String, Vec<ContractMonth>>,
    half_year: BTreeMap<String, Vec<ContractMonth>>,
    calendar: BTreeMap<String, Vec<ContractMonth>>,
}

impl Default for TenorMappings {
    fn default() -> Self {
        Self::build(DEFAULT_START_YEAR, DEFAULT_SPAN_YEARS)
    }
}

impl TenorMappings {
    /// Builds the tables for `span_years` calendar years from `start_year`.
    ///
    /// Quarters and halves are calendar-aligned: Q1 = Jan–Mar, H1 = Jan–Jun.
    /// Keys carry the two-digit year (`Q1-26`, `H2-27`, `Cal28`); contract
    /// months carry the last year digit, so spans beyond ten years would
    /// produce ambiguous codes and are rejected by configuration validation.
    pub fn build(start_year: u16, span_years: u8) -> Self {
        let mut quarterly = BTreeMap::new();
        let mut half_year = BTreeMap::new();
        let mut calendar = BTreeMap::new();

        for year in start_year..start_year.saturating_add(span_years as u16) {
            let yy = year % 100;
            let months: Vec<ContractMonth> = MonthCode::ALL
                .iter()
                .map(|m| ContractMonth::for_year(*m, year))
                .collect();

            for (q, chunk) in months.chunks(3).enumerate() {
                quarterly.insert(format!("Q{}-{:02}", q + 1, yy), chunk.to_vec());
            }
            for (h, chunk) in months.chunks(6).enumerate() {
                half_year.insert(format!("H{}-{:02}", h + 1, yy), chunk.to_vec());
            }
            calendar.insert(format!("Cal{:02}", yy), months);
        }

        Self {
            start_year,
            span_years,
            quarterly,
            half_year,
            calendar,
        }
    }

    /// First calendar year covered.
    pub fn start_year(&self) -> u16 {
        self.start_year
    }

    /// Number of calendar years covered.
    pub fn span_years(&self) -> u8 {
        self.span_years
    }

    /// First year of the ten-year window that year digits resolve into.
    ///
    /// A horizon inside one decade keeps the decade start, so digits order
    /// numerically. A horizon that crosses a decade starts the window at
    /// `start_year`, placing `F0` after `Z9` for 2028..=2030.
    pub fn year_window_start(&self) -> u16 {
        let decade = self.start_year - self.start_year % 10;
        let last = self
            .start_year
            .saturating_add(u16::from(self.span_years.max(1)) - 1);
        if last < decade + 10 {
            decade
        } else {
            self.start_year
        }
    }

    /// Table for a compound kind; `None` for outright and spread.
    pub fn table(&self, kind: TenorKind) -> Option<&BTreeMap<String, Vec<ContractMonth>>> {
        match kind {
            TenorKind::Quarterly => Some(&self.quarterly),
            TenorKind::Half => Some(&self.half_year),
            TenorKind::Calendar => Some(&self.calendar),
            TenorKind::Outright | TenorKind::Spread => None,
        }
    }

    /// Looks up an already-normalised compound code.
    pub fn lookup(&self, kind: TenorKind, normalized: &str) -> Option<&[ContractMonth]> {
        self.table(kind)?.get(normalized).map(Vec::as_slice)
    }

    /// Resolves a non-spread tenor to its ordered contract months.
    ///
    /// Spreads are resolved leg by leg by the caller; passing one here
    /// yields [`Resolution::Unmapped`] on the whole string.
    pub fn resolve<'a>(&'a self, tenor: &'a Tenor) -> Resolution<'a> {
        match tenor {
            Tenor::Outright(code) => Resolution::Outright(code),
            Tenor::Quarterly(code) | Tenor::Half(code) | Tenor::Calendar(code) => {
                let normalized = normalize(code);
                match self.lookup(tenor.kind(), &normalized) {
                    Some(months) => Resolution::Resolved(months),
                    None => Resolution::Unmapped {
                        code: code.clone(),
                        normalized,
                    },
                }
            }
            Tenor::Spread(..) => Resolution::Unmapped {
                code: tenor.to_string(),
                normalized: tenor.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(months: &[ContractMonth]) -> Vec<String> {
        months.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_default_horizon_table_sizes() {
        let maps = TenorMappings::default();
        assert_eq!(maps.start_year(), 2026);
        assert_eq!(maps.span_years(), 3);
        assert_eq!(maps.table(TenorKind::Quarterly).unwrap().len(), 12);
        assert_eq!(maps.table(TenorKind::Half).unwrap().len(), 6);
        assert_eq!(maps.table(TenorKind::Calendar).unwrap().len(), 3);
        assert!(maps.table(TenorKind::Outright).is_none());
    }

    #[test]
    fn test_year_window_start() {
        assert_eq!(TenorMappings::default().year_window_start(), 2020);
        assert_eq!(TenorMappings::build(2020, 10).year_window_start(), 2020);
        assert_eq!(TenorMappings::build(2028, 2).year_window_start(), 2020);
        assert_eq!(TenorMappings::build(2028, 3).year_window_start(), 2028);
        assert_eq!(TenorMappings::build(2025, 10).year_window_start(), 2025);
    }

    #[test]
    fn test_every_entry_has_bundle_length_in_calendar_order() {
        let maps = TenorMappings::default();
        for (kind, len) in [
            (TenorKind::Quarterly, 3),
            (TenorKind::Half, 6),
            (TenorKind::Calendar, 12),
        ] {
            for (key, months) in maps.table(kind).unwrap() {
                assert_eq!(months.len(), len, "{} should have {} months", key, len);
                assert!(
                    months.windows(2).all(|w| w[0] < w[1]),
                    "{} should be in calendar order",
                    key
                );
            }
        }
    }

    #[test]
    fn test_quarter_and_half_alignment() {
        let maps = TenorMappings::default();
        assert_eq!(
            codes(maps.lookup(TenorKind::Quarterly, "Q1-27").unwrap()),
            vec!["F7", "G7", "H7"]
        );
        assert_eq!(
            codes(maps.lookup(TenorKind::Quarterly, "Q4-28").unwrap()),
            vec!["V8", "X8", "Z8"]
        );
        assert_eq!(
            codes(maps.lookup(TenorKind::Half, "H2-26").unwrap()),
            vec!["N6", "Q6", "U6", "V6", "X6", "Z6"]
        );
        assert_eq!(
            codes(maps.lookup(TenorKind::Calendar, "Cal27").unwrap()),
            vec!["F7", "G7", "H7", "J7", "K7", "M7", "N7", "Q7", "U7", "V7", "X7", "Z7"]
        );
    }

    #[test]
    fn test_outside_horizon_is_absent() {
        let maps = TenorMappings::default();
        assert!(maps.lookup(TenorKind::Quarterly, "Q1-25").is_none());
        assert!(maps.lookup(TenorKind::Calendar, "Cal29").is_none());
    }

    #[test]
    fn test_custom_horizon() {
        let maps = TenorMappings::build(2030, 1);
        assert_eq!(
            codes(maps.lookup(TenorKind::Quarterly, "Q3-30").unwrap()),
            vec!["N0", "Q0", "U0"]
        );
        assert!(maps.lookup(TenorKind::Quarterly, "Q3-26").is_none());
    }

    #[test]
    fn test_resolve_normalises_four_digit_years() {
        let maps = TenorMappings::default();
        let tenor = Tenor::parse("Q2-2026").unwrap();
        match maps.resolve(&tenor) {
            Resolution::Resolved(months) => assert_eq!(codes(months), vec!["J6", "K6", "M6"]),
            other => panic!("Expected resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_outright_and_miss() {
        let maps = TenorMappings::default();
        let outright = Tenor::parse("H6").unwrap();
        assert_eq!(maps.resolve(&outright), Resolution::Outright("H6"));

        let miss = Tenor::parse("Cal2031").unwrap();
        let resolution = maps.resolve(&miss);
        assert!(resolution.is_unmapped());
        assert_eq!(
            resolution,
            Resolution::Unmapped {
                code: "Cal2031".to_string(),
                normalized: "Cal31".to_string()
            }
        );
        assert_eq!(resolution.months(), vec!["Cal2031"]);
    }
}
