use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a quoted price is a consumer (retail) or bulk (wholesale) price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Retail,
    Wholesale,
}

impl PriceType {
    /// Canonical label as it appears in the trained vocabulary
    /// (sentence case: first letter capitalized, rest lowercased).
    pub fn label(&self) -> &'static str {
        match self {
            PriceType::Retail => "Retail",
            PriceType::Wholesale => "Wholesale",
        }
    }
}

impl FromStr for PriceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retail" => Ok(PriceType::Retail),
            "wholesale" => Ok(PriceType::Wholesale),
            _ => anyhow::bail!(
                "Invalid price type: {}. Must be 'retail' or 'wholesale'",
                s
            ),
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceType::Retail => write!(f, "retail"),
            PriceType::Wholesale => write!(f, "wholesale"),
        }
    }
}

/// One price-forecast request, created at the API boundary and immutable
/// afterwards. `date` is carried through verbatim; the core does not
/// validate it semantically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub date: String,
    pub admin1: String,
    pub market: String,
    pub commodity: String,
    pub price_type: PriceType,
    pub previous_price: f64,
}

/// Point estimate plus empirical interval reduced from the ensemble.
/// Derived per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnsembleEstimate {
    pub mean: f64,
    pub low: f64,
    pub high: f64,
    pub interval_coverage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Sell,
    Hold,
    Buy,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Sell => write!(f, "sell"),
            Action::Hold => write!(f, "hold"),
            Action::Buy => write!(f, "buy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// Actionable advice derived from a predicted-vs-previous price delta.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub commodity: String,
    pub market: String,
    pub action: Action,
    pub confidence: Confidence,
    pub messages: Vec<String>,
    pub rationale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketKind {
    Wholesale,
    Retail,
    Mixed,
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketKind::Wholesale => write!(f, "wholesale"),
            MarketKind::Retail => write!(f, "retail"),
            MarketKind::Mixed => write!(f, "mixed"),
        }
    }
}

/// One synthesized nearby market.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyMarket {
    pub name: String,
    pub distance_km: f64,
    pub estimated_price: f64,
    pub kind: MarketKind,
}

/// Localized view of nearby market prices for one region and commodity.
/// Computed fresh per request; no persistence.
#[derive(Debug, Clone, Serialize)]
pub struct MicroMarketSnapshot {
    pub commodity: String,
    pub region: String,
    pub markets: Vec<NearbyMarket>,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub spread: f64,
    pub recommended_market: String,
    pub comparison: String,
}

/// Decision-ready forecast assembled from the estimate and the sanity rule.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub commodity: String,
    pub market: String,
    pub date: String,
    pub predicted_per_kg: f64,
    pub unit: String,
    pub price_type: PriceType,
    pub previous_price: f64,
    pub confidence_pct: f64,
    pub error_margin: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub unreasonable: bool,
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_type_parsing() {
        assert_eq!("retail".parse::<PriceType>().unwrap(), PriceType::Retail);
        assert_eq!(
            "  WHOLESALE ".parse::<PriceType>().unwrap(),
            PriceType::Wholesale
        );
        assert!("auction".parse::<PriceType>().is_err());
    }

    #[test]
    fn test_price_type_label_is_sentence_case() {
        assert_eq!(PriceType::Retail.label(), "Retail");
        assert_eq!(PriceType::Wholesale.label(), "Wholesale");
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Sell.to_string(), "sell");
        assert_eq!(Confidence::High.to_string(), "high");
    }
}
