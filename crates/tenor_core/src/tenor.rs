//! Tenor classification.
//!
//! A tenor string is parsed once into a [`Tenor`] variant; everything
//! downstream matches on the variant instead of re-inspecting the string.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TenorError;

/// Five-way tenor category.
///
/// # Examples
///
/// ```
/// use tenor_core::tenor::TenorKind;
///
/// assert_eq!(TenorKind::classify("H6"), TenorKind::Outright);
/// assert_eq!(TenorKind::classify("H1-26"), TenorKind::Half);
/// assert_eq!(TenorKind::classify("J6/Q2-26"), TenorKind::Spread);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TenorKind {
    /// Single contract month, e.g. `H6`.
    Outright,
    /// Calendar quarter, e.g. `Q2-26`.
    Quarterly,
    /// Calendar half-year, e.g. `H1-2026`.
    Half,
    /// Full calendar year, e.g. `Cal27`.
    Calendar,
    /// Two tenors joined by `/`.
    Spread,
}

impl TenorKind {
    /// Classifies a tenor string.
    ///
    /// Rules are checked in order and the first match wins:
    /// 1. contains `/` → spread
    /// 2. starts with `Q` and contains `-` → quarterly
    /// 3. starts with `H` and contains `-` → half
    /// 4. starts with `Cal` → calendar
    /// 5. otherwise → outright
    pub fn classify(tenor: &str) -> Self {
        if tenor.contains('/') {
            TenorKind::Spread
        } else if tenor.starts_with('Q') && tenor.contains('-') {
            TenorKind::Quarterly
        } else if tenor.starts_with('H') && tenor.contains('-') {
            TenorKind::Half
        } else if tenor.starts_with("Cal") {
            TenorKind::Calendar
        } else {
            TenorKind::Outright
        }
    }

    /// Lower-case category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TenorKind::Outright => "outright",
            TenorKind::Quarterly => "quarterly",
            TenorKind::Half => "half",
            TenorKind::Calendar => "calendar",
            TenorKind::Spread => "spread",
        }
    }

    /// Number of contract months a compound tenor of this kind spans.
    ///
    /// Returns `None` for spreads, whose size depends on their legs.
    pub fn months(&self) -> Option<usize> {
        match self {
            TenorKind::Outright => Some(1),
            TenorKind::Quarterly => Some(3),
            TenorKind::Half => Some(6),
            TenorKind::Calendar => Some(12),
            TenorKind::Spread => None,
        }
    }

    /// True for quarterly, half and calendar bundles.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            TenorKind::Quarterly | TenorKind::Half | TenorKind::Calendar
        )
    }
}

impl fmt::Display for TenorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed tenor.
///
/// Spread legs are never spreads themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tenor {
    /// Single contract month (kept verbatim).
    Outright(String),
    /// Quarterly bundle code as written.
    Quarterly(String),
    /// Half-year bundle code as written.
    Half(String),
    /// Calendar bundle code as written.
    Calendar(String),
    /// `leg1/leg2`.
    Spread(Box<Tenor>, Box<Tenor>),
}

impl Tenor {
    /// Parses a tenor string.
    ///
    /// Any string without `/`, the empty string included, parses to a
    /// single-leg variant.
    ///
    /// # Errors
    ///
    /// [`TenorError::InvalidSpreadFormat`] when the string contains `/` but
    /// does not split into exactly two non-empty legs.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenor_core::tenor::{Tenor, TenorKind};
    ///
    /// let spread = Tenor::parse("Q2-26/Q3-26").unwrap();
    /// assert_eq!(spread.kind(), TenorKind::Spread);
    /// let (leg1, leg2) = spread.legs().unwrap();
    /// assert_eq!(leg1, &Tenor::Quarterly("Q2-26".to_string()));
    /// assert_eq!(leg2.kind(), TenorKind::Quarterly);
    ///
    /// assert!(Tenor::parse("Z6/").is_err());
    /// ```
    pub fn parse(tenor: &str) -> Result<Self, TenorError> {
        match TenorKind::classify(tenor) {
            TenorKind::Spread => {
                let parts: Vec<&str> = tenor.split('/').collect();
                match parts.as_slice() {
                    [leg1, leg2] if !leg1.is_empty() && !leg2.is_empty() => Ok(Tenor::Spread(
                        Box::new(Self::single(leg1)),
                        Box::new(Self::single(leg2)),
                    )),
                    _ => Err(TenorError::InvalidSpreadFormat {
                        tenor: tenor.to_string(),
                        legs: parts.len(),
                    }),
                }
            }
            _ => Ok(Self::single(tenor)),
        }
    }

    // Caller guarantees `code` has no '/'.
    fn single(code: &str) -> Self {
        match TenorKind::classify(code) {
            TenorKind::Quarterly => Tenor::Quarterly(code.to_string()),
            TenorKind::Half => Tenor::Half(code.to_string()),
            TenorKind::Calendar => Tenor::Calendar(code.to_string()),
            TenorKind::Outright | TenorKind::Spread => Tenor::Outright(code.to_string()),
        }
    }

    /// Category of this tenor.
    pub fn kind(&self) -> TenorKind {
        match self {
            Tenor::Outright(_) => TenorKind::Outright,
            Tenor::Quarterly(_) => TenorKind::Quarterly,
            Tenor::Half(_) => TenorKind::Half,
            Tenor::Calendar(_) => TenorKind::Calendar,
            Tenor::Spread(..) => TenorKind::Spread,
        }
    }

    /// Raw code of a non-spread tenor.
    pub fn code(&self) -> Option<&str> {
        match self {
            Tenor::Outright(code)
            | Tenor::Quarterly(code)
            | Tenor::Half(code)
            | Tenor::Calendar(code) => Some(code),
            Tenor::Spread(..) => None,
        }
    }

    /// Both legs of a spread.
    pub fn legs(&self) -> Option<(&Tenor, &Tenor)> {
        match self {
            Tenor::Spread(leg1, leg2) => Some((leg1, leg2)),
            _ => None,
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Spread(leg1, leg2) => write!(f, "{}/{}", leg1, leg2),
            Tenor::Outright(code)
            | Tenor::Quarterly(code)
            | Tenor::Half(code)
            | Tenor::Calendar(code) => f.write_str(code),
        }
    }
}

impl FromStr for Tenor {
    type Err = TenorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
