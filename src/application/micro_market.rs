use crate::domain::commodity::{CommodityCatalog, CommodityThresholds};
use crate::domain::errors::ForecastError;
use crate::domain::types::{MarketKind, MicroMarketSnapshot, NearbyMarket};
use statrs::statistics::{Data, Distribution};

/// Spread (absolute KES) above which nearby-market prices count as high
/// variance.
const HIGH_VARIANCE_SPREAD: f64 = 10.0;

/// Synthesizes a localized view of nearby market prices.
///
/// Real geospatial lookup is out of scope: the neighbor list is derived
/// deterministically from the commodity ceiling and the requested radius,
/// so responses are reproducible for a given input.
pub struct MicroMarketAggregator {
    catalog: CommodityCatalog,
    thresholds: CommodityThresholds,
}

impl MicroMarketAggregator {
    pub fn new(catalog: CommodityCatalog, thresholds: CommodityThresholds) -> Self {
        Self {
            catalog,
            thresholds,
        }
    }

    pub fn localize(
        &self,
        commodity: &str,
        region: &str,
        radius_km: f64,
    ) -> Result<MicroMarketSnapshot, ForecastError> {
        let resolved = self.catalog.resolve(commodity)?;
        let base_price = self.thresholds.ceiling(resolved);

        let markets = vec![
            NearbyMarket {
                name: format!("{region} Central Market"),
                distance_km: 0.0,
                estimated_price: round2(base_price * 0.9),
                kind: MarketKind::Wholesale,
            },
            NearbyMarket {
                name: format!("{region} Retail Hub"),
                distance_km: round1(radius_km * 0.3),
                estimated_price: round2(base_price * 1.1),
                kind: MarketKind::Retail,
            },
            NearbyMarket {
                name: format!("Near {region} Market"),
                distance_km: round1(radius_km * 0.6),
                estimated_price: round2(base_price * 0.95),
                kind: MarketKind::Mixed,
            },
        ];

        let prices: Vec<f64> = markets.iter().map(|m| m.estimated_price).collect();
        let average_price = round2(Data::new(prices.clone()).mean().unwrap_or(0.0));
        let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spread = round2(max_price - min_price);

        let comparison = if spread > HIGH_VARIANCE_SPREAD {
            format!(
                "High price variance ({spread} KES) across nearby markets. Shopping around could save money."
            )
        } else {
            "Relatively stable prices across nearby markets.".to_string()
        };

        // Fixed convention: always the first-listed market, not a computed
        // optimum.
        let recommended_market = markets[0].name.clone();

        Ok(MicroMarketSnapshot {
            commodity: commodity.to_string(),
            region: region.to_string(),
            markets,
            average_price,
            min_price: round2(min_price),
            max_price: round2(max_price),
            spread,
            recommended_market,
            comparison,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
