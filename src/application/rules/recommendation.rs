use crate::domain::commodity::{CommodityCatalog, CommodityThresholds};
use crate::domain::errors::ForecastError;
use crate::domain::types::{Action, Confidence, PriceType, Recommendation};

/// Share of the sanity ceiling above which the approach warning fires.
const CEILING_APPROACH_RATIO: f64 = 0.8;

/// Classifies a predicted-vs-previous price delta into actionable advice.
///
/// Bands are evaluated top to bottom, first match wins:
/// - change > +10%: sell, high confidence
/// - change > +5%: sell, medium
/// - change < -10%: hold, high
/// - change < -5%: hold, medium
/// - otherwise: hold, medium (stable)
pub struct RecommendationRule {
    catalog: CommodityCatalog,
    thresholds: CommodityThresholds,
}

impl RecommendationRule {
    pub fn new(catalog: CommodityCatalog, thresholds: CommodityThresholds) -> Self {
        Self {
            catalog,
            thresholds,
        }
    }

    pub fn recommend(
        &self,
        commodity: &str,
        market: &str,
        predicted_price: f64,
        previous_price: f64,
        price_type: PriceType,
    ) -> Result<Recommendation, ForecastError> {
        let resolved = self.catalog.resolve(commodity)?;

        // Division-by-zero guard.
        if previous_price <= 0.0 {
            return Err(ForecastError::InvalidPreviousPrice {
                value: previous_price,
            });
        }

        let pct_change = (predicted_price - previous_price) / previous_price * 100.0;

        let mut messages = Vec::new();
        let (action, confidence, rationale) = if pct_change > 10.0 {
            messages.push(format!(
                "Predicted price increase of {pct_change:.1}% - consider selling soon"
            ));
            messages.push("Market conditions favor sellers".to_string());
            if price_type == PriceType::Retail {
                messages
                    .push("Retail prices are high - good time to market your produce".to_string());
            }
            (
                Action::Sell,
                Confidence::High,
                "Significant price increase predicted. Selling now or in the near future could maximize returns.",
            )
        } else if pct_change > 5.0 {
            messages.push(format!(
                "Moderate price increase of {pct_change:.1}% expected"
            ));
            messages.push("Consider selling within the next few days".to_string());
            (
                Action::Sell,
                Confidence::Medium,
                "Moderate price increase expected. Timing the market in the next week could be beneficial.",
            )
        } else if pct_change < -10.0 {
            messages.push(format!(
                "Predicted price drop of {:.1}% - consider holding",
                pct_change.abs()
            ));
            messages.push("Wait for better market conditions before selling".to_string());
            messages.push("Consider storage options if possible".to_string());
            (
                Action::Hold,
                Confidence::High,
                "Significant price drop expected. Holding and waiting for price recovery may be more profitable.",
            )
        } else if pct_change < -5.0 {
            messages.push(format!(
                "Moderate price decrease of {:.1}% expected",
                pct_change.abs()
            ));
            messages.push("Monitor market closely over the next few days".to_string());
            (
                Action::Hold,
                Confidence::Medium,
                "Moderate price decrease expected. Monitor market conditions before making selling decisions.",
            )
        } else {
            messages.push("Stable prices expected".to_string());
            messages.push("No urgent action required - normal market conditions".to_string());
            (
                Action::Hold,
                Confidence::Medium,
                "Price stability expected. Normal selling patterns can continue.",
            )
        };

        // Band-independent warning once the estimate nears the sanity ceiling.
        let ceiling = self.thresholds.ceiling(resolved);
        if predicted_price > ceiling * CEILING_APPROACH_RATIO {
            messages.push(format!(
                "Price approaching threshold limit ({ceiling} KES/kg)"
            ));
        }

        Ok(Recommendation {
            commodity: commodity.to_string(),
            market: market.to_string(),
            action,
            confidence,
            messages,
            rationale: rationale.to_string(),
        })
    }
}
