//! Year-suffix canonicalisation for compound tenors.
//!
//! Mapping-table keys always carry a two-digit year (`Q2-26`, `H1-27`,
//! `Cal28`). Inputs may use four digits (`Q2-2026`, `Cal2028`).

/// Rewrites a compound tenor's four-digit year to its last two digits.
///
/// - `Cal2027` → `Cal27`; `Cal27` unchanged.
/// - `Q2-2026` → `Q2-26`, `H1-2026` → `H1-26`; two-digit forms unchanged.
/// - Any other shape is returned unchanged.
///
/// Normalisation is idempotent.
///
/// # Examples
///
/// ```
/// use tenor_core::normalize::normalize;
///
/// assert_eq!(normalize("Q2-2026"), "Q2-26");
/// assert_eq!(normalize("Q2-26"), "Q2-26");
/// assert_eq!(normalize("Cal2027"), "Cal27");
/// assert_eq!(normalize("J6"), "J6");
/// ```
pub fn normalize(tenor: &str) -> String {
    if tenor.contains("Cal") {
        if let Some(year) = tenor.strip_prefix("Cal") {
            if year.chars().count() == 4 {
                return format!("Cal{}", last_two(year));
            }
        }
        return tenor.to_string();
    }

    if tenor.contains('-') && (tenor.starts_with('Q') || tenor.starts_with('H')) {
        let parts: Vec<&str> = tenor.split('-').collect();
        if let [prefix, year] = parts.as_slice() {
            if year.chars().count() == 4 {
                return format!("{}-{}", prefix, last_two(year));
            }
        }
    }

    tenor.to_string()
}

fn last_two(s: &str) -> &str {
    let count = s.chars().count();
    match s.char_indices().nth(count.saturating_sub(2)) {
        Some((start, _)) => &s[start..],
        None => s,
    }
}
