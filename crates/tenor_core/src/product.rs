//! Product-label canonicalisation.

use std::collections::BTreeMap;

/// Canonical products in summary column order.
pub const CANONICAL_PRODUCTS: [&str; 5] = ["HTT", "HOUBR", "CLBR", "WDF", "LH"];

/// Raw product label → canonical product.
///
/// Cosmetic variants (space vs underscore suffixes, "Rolls"/"Boxes"
/// naming) collapse onto one of [`CANONICAL_PRODUCTS`]. Unknown labels map
/// to themselves.
///
/// # Examples
///
/// ```
/// use tenor_core::product::ProductMap;
///
/// let products = ProductMap::default();
/// assert_eq!(products.map("HOUBR Boxes"), "HOUBR");
/// assert_eq!(products.map("HTTMID"), "LH");
/// assert_eq!(products.map("Brent"), "Brent");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMap {
    aliases: BTreeMap<String, String>,
}

impl Default for ProductMap {
    fn default() -> Self {
        let aliases = [
            ("HTT", "HTT"),
            ("HTT Rolls", "HTT"),
            ("HOUBR", "HOUBR"),
            ("HOUBR_Cross", "HOUBR"),
            ("HOUBR Boxes", "HOUBR"),
            ("CLBR", "CLBR"),
            ("CLBR Boxes", "CLBR"),
            ("HTTMID", "LH"),
            ("WDF", "WDF"),
        ]
        .into_iter()
        .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
        .collect();

        Self { aliases }
    }
}

impl ProductMap {
    /// Adds or replaces an alias.
    pub fn with_alias(mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(raw.into(), canonical.into());
        self
    }

    /// Canonical product for a known label.
    pub fn canonical(&self, raw: &str) -> Option<&str> {
        self.aliases.get(raw).map(String::as_str)
    }

    /// Canonical product, or the raw label itself when unknown.
    pub fn map<'a>(&'a self, raw: &'a str) -> &'a str {
        self.canonical(raw).unwrap_or(raw)
    }

    /// True when `raw` has an alias.
    pub fn contains(&self, raw: &str) -> bool {
        self.aliases.contains_key(raw)
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// True when no aliases are defined.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterates `(raw, canonical)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// True for one of the five summary products.
pub fn is_canonical(product: &str) -> bool {
    CANONICAL_PRODUCTS.contains(&product)
}
