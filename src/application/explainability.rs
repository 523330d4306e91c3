use crate::domain::commodity::CommodityCatalog;
use crate::domain::errors::ForecastError;
use crate::domain::types::PriceType;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct InfluencingFactor {
    pub factor: String,
    pub importance: f64,
    pub impact: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceFactors {
    pub data_quality: String,
    pub historical_accuracy: f64,
    pub sample_size: String,
    pub market_volatility: String,
    pub prediction_reliability: String,
}

/// Why a prediction came out the way it did, for end-user transparency.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub commodity: String,
    pub market: String,
    pub predicted_price: f64,
    pub top_influencing_factors: Vec<InfluencingFactor>,
    pub explanation_summary: String,
    pub confidence_factors: ConfidenceFactors,
}

/// Produces factor-importance explanations for delivered predictions.
///
/// Importances are indicative for the deployed forest as a whole, not
/// per-request attributions; the shares are fixed alongside the other
/// locked business constants.
pub struct ExplainabilityService {
    catalog: CommodityCatalog,
}

impl ExplainabilityService {
    pub fn new(catalog: CommodityCatalog) -> Self {
        Self { catalog }
    }

    pub fn explain(
        &self,
        commodity: &str,
        market: &str,
        predicted_price: f64,
        previous_price: Option<f64>,
        price_type: Option<PriceType>,
    ) -> Result<Explanation, ForecastError> {
        self.catalog.resolve(commodity)?;

        let previous_display = previous_price
            .map(|p| p.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let price_type_display = price_type.unwrap_or(PriceType::Retail);

        let top_influencing_factors = vec![
            InfluencingFactor {
                factor: "Previous Period Price".to_string(),
                importance: 0.45,
                impact: "High".to_string(),
                description: format!(
                    "Historical price of {previous_display} KES/kg strongly influences the forecast"
                ),
            },
            InfluencingFactor {
                factor: "Market Location".to_string(),
                importance: 0.25,
                impact: "Medium".to_string(),
                description: format!(
                    "{market} market has specific price patterns based on historical data"
                ),
            },
            InfluencingFactor {
                factor: "Seasonality".to_string(),
                importance: 0.15,
                impact: "Medium".to_string(),
                description: "Time of year affects supply and demand dynamics".to_string(),
            },
            InfluencingFactor {
                factor: "Price Type".to_string(),
                importance: 0.10,
                impact: "Low".to_string(),
                description: format!(
                    "{price_type_display} pricing typically differs from the other market type"
                ),
            },
            InfluencingFactor {
                factor: "Regional Factors".to_string(),
                importance: 0.05,
                impact: "Low".to_string(),
                description: "Regional economic and agricultural conditions".to_string(),
            },
        ];

        let explanation_summary = format!(
            "The predicted price of {predicted_price} KES/kg for {commodity} at {market} is \
             primarily influenced by the previous period's price ({previous_display} KES/kg), \
             which accounts for 45% of the prediction. The market location and historical \
             patterns at {market} contribute 25% to the forecast. Seasonal factors and price \
             type differences make up the remaining influence."
        );

        Ok(Explanation {
            commodity: commodity.to_string(),
            market: market.to_string(),
            predicted_price,
            top_influencing_factors,
            explanation_summary,
            confidence_factors: ConfidenceFactors {
                data_quality: "high".to_string(),
                historical_accuracy: 0.85,
                sample_size: "adequate".to_string(),
                market_volatility: "moderate".to_string(),
                prediction_reliability: "good".to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_sum_to_one() {
        let svc = ExplainabilityService::new(CommodityCatalog::default());
        let explanation = svc
            .explain("cabbage", "Gikomba", 55.0, Some(100.0), Some(PriceType::Retail))
            .unwrap();

        let total: f64 = explanation
            .top_influencing_factors
            .iter()
            .map(|f| f.importance)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(explanation.top_influencing_factors.len(), 5);
    }

    #[test]
    fn test_missing_previous_price_reads_na() {
        let svc = ExplainabilityService::new(CommodityCatalog::default());
        let explanation = svc
            .explain("kale", "Kongowea", 40.0, None, None)
            .unwrap();
        assert!(
            explanation.top_influencing_factors[0]
                .description
                .contains("N/A")
        );
    }

    #[test]
    fn test_unsupported_commodity_rejected() {
        let svc = ExplainabilityService::new(CommodityCatalog::default());
        assert!(svc.explain("mango", "Gikomba", 55.0, None, None).is_err());
    }
}
