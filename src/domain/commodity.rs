use crate::domain::errors::ForecastError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The five commodities the trained model and every business rule know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commodity {
    Cabbage,
    Kale,
    Onion,
    Potatoes,
    Tomatoes,
}

impl Commodity {
    pub const ALL: [Commodity; 5] = [
        Commodity::Cabbage,
        Commodity::Kale,
        Commodity::Onion,
        Commodity::Potatoes,
        Commodity::Tomatoes,
    ];

    /// Canonical label as it appears in the trained vocabulary (title case).
    pub fn label(&self) -> &'static str {
        match self {
            Commodity::Cabbage => "Cabbage",
            Commodity::Kale => "Kale",
            Commodity::Onion => "Onion",
            Commodity::Potatoes => "Potatoes",
            Commodity::Tomatoes => "Tomatoes",
        }
    }

    /// Lowercase identifier used in requests and rule tables.
    pub fn slug(&self) -> &'static str {
        match self {
            Commodity::Cabbage => "cabbage",
            Commodity::Kale => "kale",
            Commodity::Onion => "onion",
            Commodity::Potatoes => "potatoes",
            Commodity::Tomatoes => "tomatoes",
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Resolves raw commodity strings to the canonical five, routing common
/// plurals and local synonyms through an alias table first.
///
/// Alias resolution happens on the lowercased, trimmed raw value before any
/// casing normalization. The table is injected so tests and deployments can
/// extend it without code changes.
#[derive(Debug, Clone)]
pub struct CommodityCatalog {
    aliases: HashMap<String, Commodity>,
}

impl Default for CommodityCatalog {
    fn default() -> Self {
        Self::new([
            ("onions", Commodity::Onion),
            ("tomato", Commodity::Tomatoes),
            ("irish potato", Commodity::Potatoes),
            ("potato", Commodity::Potatoes),
            ("cabbages", Commodity::Cabbage),
            ("kales", Commodity::Kale),
            ("sukuma wiki", Commodity::Kale),
        ])
    }
}

impl CommodityCatalog {
    pub fn new<'a>(aliases: impl IntoIterator<Item = (&'a str, Commodity)>) -> Self {
        let aliases = aliases
            .into_iter()
            .map(|(alias, commodity)| (alias.to_lowercase(), commodity))
            .collect();
        Self { aliases }
    }

    /// Best-effort resolution; `None` when the value is outside the universe.
    pub fn try_resolve(&self, raw: &str) -> Option<Commodity> {
        let normalized = raw.trim().to_lowercase();
        Commodity::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == normalized)
            .or_else(|| self.aliases.get(&normalized).copied())
    }

    /// Strict resolution; fails with the allowed list and known aliases.
    pub fn resolve(&self, raw: &str) -> Result<Commodity, ForecastError> {
        self.try_resolve(raw)
            .ok_or_else(|| ForecastError::UnsupportedCommodity {
                commodity: raw.trim().to_string(),
                allowed: Commodity::ALL.iter().map(|c| c.slug().to_string()).collect(),
                aliases: self.known_aliases(),
            })
    }

    fn known_aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self.aliases.keys().cloned().collect();
        aliases.sort();
        aliases
    }
}

/// Per-commodity maximum plausible price in KES per kilogram.
///
/// These are locked business-rule constants: fixed at process start and
/// read-only thereafter. The table is injected into the rules rather than
/// read as ambient state so tests can substitute alternates.
#[derive(Debug, Clone)]
pub struct CommodityThresholds {
    ceilings: HashMap<Commodity, f64>,
}

/// Fallback ceiling for a commodity missing from an injected table.
const FALLBACK_CEILING: f64 = 50.0;

impl Default for CommodityThresholds {
    fn default() -> Self {
        Self::new([
            (Commodity::Cabbage, 126.0),
            (Commodity::Kale, 50.0),
            (Commodity::Onion, 13.0),
            (Commodity::Potatoes, 50.0),
            (Commodity::Tomatoes, 64.0),
        ])
    }
}

impl CommodityThresholds {
    pub fn new(entries: impl IntoIterator<Item = (Commodity, f64)>) -> Self {
        Self {
            ceilings: entries.into_iter().collect(),
        }
    }

    pub fn ceiling(&self, commodity: Commodity) -> f64 {
        self.ceilings
            .get(&commodity)
            .copied()
            .unwrap_or(FALLBACK_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_locked_table() {
        let thresholds = CommodityThresholds::default();
        assert_eq!(thresholds.ceiling(Commodity::Cabbage), 126.0);
        assert_eq!(thresholds.ceiling(Commodity::Kale), 50.0);
        assert_eq!(thresholds.ceiling(Commodity::Onion), 13.0);
        assert_eq!(thresholds.ceiling(Commodity::Potatoes), 50.0);
        assert_eq!(thresholds.ceiling(Commodity::Tomatoes), 64.0);
    }

    #[test]
    fn test_missing_entry_falls_back() {
        let thresholds = CommodityThresholds::new([(Commodity::Onion, 13.0)]);
        assert_eq!(thresholds.ceiling(Commodity::Cabbage), 50.0);
    }

    #[test]
    fn test_alias_resolution() {
        let catalog = CommodityCatalog::default();
        assert_eq!(catalog.try_resolve("Onions"), Some(Commodity::Onion));
        assert_eq!(catalog.try_resolve("tomato"), Some(Commodity::Tomatoes));
        assert_eq!(catalog.try_resolve("Irish Potato"), Some(Commodity::Potatoes));
        assert_eq!(catalog.try_resolve("sukuma wiki"), Some(Commodity::Kale));
    }

    #[test]
    fn test_canonical_names_resolve_directly() {
        let catalog = CommodityCatalog::default();
        for commodity in Commodity::ALL {
            assert_eq!(catalog.try_resolve(commodity.slug()), Some(commodity));
            assert_eq!(catalog.try_resolve(commodity.label()), Some(commodity));
        }
    }

    #[test]
    fn test_unsupported_commodity_carries_allowed_list() {
        let catalog = CommodityCatalog::default();
        let err = catalog.resolve("mango").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mango"));
        assert!(msg.contains("cabbage"));
        assert!(msg.contains("tomatoes"));
    }
}
