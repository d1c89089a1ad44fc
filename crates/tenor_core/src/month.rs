//! Futures contract-month alphabet and contract-month codes.
//!
//! A contract-month code is a month letter followed by the last digit of
//! the delivery year, e.g. `J6` for April 2026.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TenorError;

/// Delivery month letter from the fixed 12-symbol futures alphabet.
///
/// # Examples
///
/// ```
/// use tenor_core::month::MonthCode;
///
/// assert_eq!(MonthCode::from_letter('J'), Some(MonthCode::J));
/// assert_eq!(MonthCode::J.index(), 3);
/// assert_eq!(MonthCode::J.name(), "Apr");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonthCode {
    /// January
    F,
    /// February
    G,
    /// March
    H,
    /// April
    J,
    /// May
    K,
    /// June
    M,
    /// July
    N,
    /// August
    Q,
    /// September
    U,
    /// October
    V,
    /// November
    X,
    /// December
    Z,
}

impl MonthCode {
    /// All twelve month codes in calendar order.
    pub const ALL: [MonthCode; 12] = [
        MonthCode::F,
        MonthCode::G,
        MonthCode::H,
        MonthCode::J,
        MonthCode::K,
        MonthCode::M,
        MonthCode::N,
        MonthCode::Q,
        MonthCode::U,
        MonthCode::V,
        MonthCode::X,
        MonthCode::Z,
    ];

    /// Returns the zero-based calendar index (January = 0).
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the month code for a zero-based calendar index.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the futures letter for this month.
    pub fn letter(&self) -> char {
        match self {
            MonthCode::F => 'F',
            MonthCode::G => 'G',
            MonthCode::H => 'H',
            MonthCode::J => 'J',
            MonthCode::K => 'K',
            MonthCode::M => 'M',
            MonthCode::N => 'N',
            MonthCode::Q => 'Q',
            MonthCode::U => 'U',
            MonthCode::V => 'V',
            MonthCode::X => 'X',
            MonthCode::Z => 'Z',
        }
    }

    /// Parses a futures month letter. Only upper-case letters are accepted.
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.letter() == letter)
    }

    /// Short English month name.
    pub fn name(&self) -> &'static str {
        match self {
            MonthCode::F => "Jan",
            MonthCode::G => "Feb",
            MonthCode::H => "Mar",
            MonthCode::J => "Apr",
            MonthCode::K => "May",
            MonthCode::M => "Jun",
            MonthCode::N => "Jul",
            MonthCode::Q => "Aug",
            MonthCode::U => "Sep",
            MonthCode::V => "Oct",
            MonthCode::X => "Nov",
            MonthCode::Z => "Dec",
        }
    }
}

impl fmt::Display for MonthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single futures contract month, e.g. `J6`.
///
/// Ordering is by the year digit first, then calendar month, which is
/// chronological within a single decade. Use
/// [`ContractMonth::cmp_in_window`] when the horizon crosses a decade.
///
/// # Examples
///
/// ```
/// use tenor_core::month::{ContractMonth, MonthCode};
///
/// let april = ContractMonth::new(MonthCode::J, 6).unwrap();
/// assert_eq!(april.to_string(), "J6");
/// assert_eq!("J6".parse::<ContractMonth>().unwrap(), april);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractMonth {
    month: MonthCode,
    year_digit: u8,
}

impl ContractMonth {
    /// Creates a contract month. `year_digit` must be 0..=9.
    pub fn new(month: MonthCode, year_digit: u8) -> Option<Self> {
        (year_digit <= 9).then_some(Self { month, year_digit })
    }

    /// Creates the contract month for `month` in the given calendar year.
    pub fn for_year(month: MonthCode, year: u16) -> Self {
        Self {
            month,
            year_digit: (year % 10) as u8,
        }
    }

    /// Delivery month letter.
    #[inline]
    pub fn month(&self) -> MonthCode {
        self.month
    }

    /// Last digit of the delivery year.
    #[inline]
    pub fn year_digit(&self) -> u8 {
        self.year_digit
    }

    /// Delivery year: the first year at or after `window_start` ending in
    /// this contract's digit.
    pub fn year_in_window(&self, window_start: u16) -> u16 {
        window_start + window_year_offset(window_start.into(), self.year_digit.into()) as u16
    }

    /// Chronological comparison with year digits resolved against
    /// `window_start`.
    pub fn cmp_in_window(&self, other: &Self, window_start: u16) -> Ordering {
        (self.year_in_window(window_start), self.month)
            .cmp(&(other.year_in_window(window_start), other.month))
    }
}

#[inline]
fn window_year_offset(window_start: u32, digit: u32) -> u32 {
    (digit + 10 - window_start % 10) % 10
}

impl PartialOrd for ContractMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContractMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year_digit, self.month).cmp(&(other.year_digit, other.month))
    }
}

impl fmt::Display for ContractMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.month.letter(), self.year_digit)
    }
}

impl FromStr for ContractMonth {
    type Err = TenorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(TenorError::InvalidContractMonth(s.to_string()));
        };

        let month = MonthCode::from_letter(letter)
            .ok_or_else(|| TenorError::InvalidContractMonth(s.to_string()))?;
        let year_digit = digit
            .to_digit(10)
            .ok_or_else(|| TenorError::InvalidContractMonth(s.to_string()))?;

        Ok(Self {
            month,
            year_digit: year_digit as u8,
        })
    }
}

/// Chronological sort key for contract-month strings.
///
/// Valid codes map to `(year, month index)` where the year is
/// `2000 + <digits after the letter>`. Anything that does not parse maps to
/// [`ChronoKey::Invalid`], which orders after every valid key.
///
/// [`ChronoKey::in_window`] resolves a single year digit against a
/// ten-year window instead, so `F0` follows `Z9` in a 2028 window.
///
/// # Examples
///
/// ```
/// use tenor_core::month::ChronoKey;
///
/// assert!(ChronoKey::of("Z6") < ChronoKey::of("F7"));
/// assert!(ChronoKey::of("Z8") < ChronoKey::of("Q2-30"));
/// assert_eq!(ChronoKey::of("A6"), ChronoKey::Invalid);
/// assert!(ChronoKey::in_window("Z9", 2028) < ChronoKey::in_window("F0", 2028));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChronoKey {
    /// Parsed delivery year and zero-based month index.
    Valid {
        /// Calendar year
        year: u32,
        /// Month index (January = 0)
        month: usize,
    },
    /// Unparseable code.
    Invalid,
}

impl ChronoKey {
    /// Computes the sort key of a contract-month string.
    pub fn of(code: &str) -> Self {
        Self::in_window(code, 2000)
    }

    /// Computes the sort key with a single year digit mapped to the first
    /// year at or after `window_start` ending in that digit. Multi-digit
    /// years are read as `2000 + digits`.
    pub fn in_window(code: &str, window_start: u32) -> Self {
        let mut chars = code.chars();
        let Some(letter) = chars.next() else {
            return ChronoKey::Invalid;
        };
        let digits = chars.as_str();

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return ChronoKey::Invalid;
        }
        let (Some(month), Some(year)) = (
            MonthCode::from_letter(letter),
            digits.parse::<u32>().ok().and_then(|value| {
                if digits.len() == 1 {
                    window_start.checked_add(window_year_offset(window_start, value))
                } else {
                    value.checked_add(2000)
                }
            }),
        ) else {
            return ChronoKey::Invalid;
        };

        ChronoKey::Valid {
            year,
            month: month.index(),
        }
    }

    /// Returns true for keys of parseable codes.
    pub fn is_valid(&self) -> bool {
        matches!(self, ChronoKey::Valid { .. })
    }
}

/// Sorts contract-month strings chronologically, invalid codes last.
///
/// Ties between invalid codes are broken on the code string so the order
/// is total and deterministic.
pub fn sort_chronologically<S: AsRef<str>>(codes: &mut [S]) {
    sort_chronologically_in_window(codes, 2000);
}

/// Like [`sort_chronologically`], with year digits resolved by
/// [`ChronoKey::in_window`].
pub fn sort_chronologically_in_window<S: AsRef<str>>(codes: &mut [S], window_start: u32) {
    codes.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        ChronoKey::in_window(a, window_start)
            .cmp(&ChronoKey::in_window(b, window_start))
            .then_with(|| a.cmp(b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_is_calendar_ordered() {
        let letters: String = MonthCode::ALL.iter().map(|m| m.letter()).collect();
        assert_eq!(letters, "FGHJKMNQUVXZ");
        for (i, m) in MonthCode::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(MonthCode::from_index(i), Some(*m));
        }
        assert_eq!(MonthCode::from_index(12), None);
    }

    #[test]
    fn test_from_letter_rejects_unknown() {
        assert_eq!(MonthCode::from_letter('A'), None);
        assert_eq!(MonthCode::from_letter('j'), None);
    }

    #[test]
    fn test_contract_month_for_year() {
        let cm = ContractMonth::for_year(MonthCode::Z, 2027);
        assert_eq!(cm.to_string(), "Z7");
        assert_eq!(cm.year_digit(), 7);
    }

    #[test]
    fn test_contract_month_parse_errors() {
        for bad in ["", "J", "J66", "A6", "JX", "6J"] {
            assert!(
                bad.parse::<ContractMonth>().is_err(),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_contract_month_ordering() {
        let z6: ContractMonth = "Z6".parse().unwrap();
        let f7: ContractMonth = "F7".parse().unwrap();
        let h6: ContractMonth = "H6".parse().unwrap();
        assert!(h6 < z6);
        assert!(z6 < f7);
    }

    #[test]
    fn test_contract_month_across_decade() {
        let z9: ContractMonth = "Z9".parse().unwrap();
        let f0: ContractMonth = "F0".parse().unwrap();
        assert!(f0 < z9);
        assert_eq!(z9.year_in_window(2028), 2029);
        assert_eq!(f0.year_in_window(2028), 2030);
        assert_eq!(z9.cmp_in_window(&f0, 2028), Ordering::Less);
        assert_eq!(z9.cmp_in_window(&f0, 2020), Ordering::Greater);
    }

    #[test]
    fn test_chrono_key_in_window() {
        assert_eq!(
            ChronoKey::in_window("F0", 2028),
            ChronoKey::Valid {
                year: 2030,
                month: 0
            }
        );
        assert_eq!(
            ChronoKey::in_window("H8", 2028),
            ChronoKey::Valid {
                year: 2028,
                month: 2
            }
        );
        assert_eq!(
            ChronoKey::in_window("Z26", 2028),
            ChronoKey::Valid {
                year: 2026,
                month: 11
            }
        );
        assert_eq!(ChronoKey::in_window("A0", 2028), ChronoKey::Invalid);
        assert_eq!(ChronoKey::in_window("J6", 2000), ChronoKey::of("J6"));
    }

    #[test]
    fn test_sort_chronologically_in_window() {
        let mut codes = vec!["G0", "Z9", "Q1-30", "F0", "H8"];
        sort_chronologically_in_window(&mut codes, 2028);
        assert_eq!(codes, vec!["H8", "Z9", "F0", "G0", "Q1-30"]);
    }

    #[test]
    fn test_chrono_key_valid() {
        assert_eq!(
            ChronoKey::of("J6"),
            ChronoKey::Valid {
                year: 2006,
                month: 3
            }
        );
        assert_eq!(
            ChronoKey::of("Z26"),
            ChronoKey::Valid {
                year: 2026,
                month: 11
            }
        );
    }

    #[test]
    fn test_chrono_key_invalid_shapes() {
        assert_eq!(ChronoKey::of(""), ChronoKey::Invalid);
        assert_eq!(ChronoKey::of("J"), ChronoKey::Invalid);
        assert_eq!(ChronoKey::of("Q2-26"), ChronoKey::Invalid);
        assert_eq!(ChronoKey::of("Cal27"), ChronoKey::Invalid);
        assert_eq!(ChronoKey::of("A6"), ChronoKey::Invalid);
    }

    #[test]
    fn test_sort_chronologically() {
        let mut codes = vec!["F7", "Q2-30", "Z6", "H6", "A6", "J6"];
        sort_chronologically(&mut codes);
        assert_eq!(codes, vec!["H6", "J6", "Z6", "F7", "A6", "Q2-30"]);
    }
}
