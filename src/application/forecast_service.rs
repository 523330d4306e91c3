use crate::application::encoder::CategoricalEncoder;
use crate::application::estimator::EnsembleEstimator;
use crate::application::features::FeatureVectorBuilder;
use crate::application::rules::ThresholdRule;
use crate::domain::commodity::CommodityCatalog;
use crate::domain::errors::ForecastError;
use crate::domain::types::{Forecast, PredictionRequest};
use std::sync::Arc;
use tracing::debug;

/// End-to-end prediction pipeline: raw request fields in, decision-ready
/// forecast out.
///
/// Owns the immutable collaborators loaded at startup; every call is a pure
/// function of the request plus that shared read-only state, so the service
/// can be shared freely across request-serving threads.
pub struct ForecastService {
    catalog: CommodityCatalog,
    encoder: CategoricalEncoder,
    builder: FeatureVectorBuilder,
    estimator: Arc<EnsembleEstimator>,
    threshold: ThresholdRule,
}

impl ForecastService {
    pub fn new(
        catalog: CommodityCatalog,
        encoder: CategoricalEncoder,
        builder: FeatureVectorBuilder,
        estimator: Arc<EnsembleEstimator>,
        threshold: ThresholdRule,
    ) -> Self {
        Self {
            catalog,
            encoder,
            builder,
            estimator,
            threshold,
        }
    }

    pub fn forecast(&self, request: &PredictionRequest) -> Result<Forecast, ForecastError> {
        let commodity = self.catalog.resolve(&request.commodity)?;
        let vector = self.builder.build(request, &self.encoder, &self.catalog)?;
        let estimate = self.estimator.estimate(&vector)?;

        let unreasonable = self.threshold.is_unreasonable(commodity, estimate.mean);
        let note = self.threshold.note(commodity, estimate.mean);

        debug!(
            commodity = %commodity,
            market = %request.market,
            mean = estimate.mean,
            unreasonable,
            "forecast computed"
        );

        Ok(Forecast {
            commodity: request.commodity.clone(),
            market: request.market.clone(),
            date: request.date.clone(),
            predicted_per_kg: round2(estimate.mean),
            unit: "kg".to_string(),
            price_type: request.price_type,
            previous_price: request.previous_price,
            confidence_pct: estimate.interval_coverage * 100.0,
            error_margin: format!("+-{}", round2(estimate.high - estimate.mean)),
            lower_bound: round2(estimate.low),
            upper_bound: round2(estimate.high),
            unreasonable,
            note,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commodity::CommodityThresholds;
    use crate::domain::schema::{
        COL_ADMIN1, COL_COMMODITY, COL_MARKET, COL_PRICE_LAG_1, COL_PRICE_TYPE, ModelSchema,
        VocabularySet,
    };
    use crate::domain::types::PriceType;
    use crate::infrastructure::mock::fixed_members;

    fn service(member_values: &[f64]) -> ForecastService {
        let schema = ModelSchema {
            feature_columns: vec![
                COL_PRICE_LAG_1.to_string(),
                COL_COMMODITY.to_string(),
                COL_MARKET.to_string(),
                COL_ADMIN1.to_string(),
                COL_PRICE_TYPE.to_string(),
            ],
            categorical_columns: vec![
                COL_COMMODITY.to_string(),
                COL_MARKET.to_string(),
                COL_ADMIN1.to_string(),
                COL_PRICE_TYPE.to_string(),
            ],
        };
        let mut vocab = VocabularySet::default();
        vocab.insert(
            COL_COMMODITY,
            vec![
                "Cabbage".to_string(),
                "Kale".to_string(),
                "Onion".to_string(),
                "Potatoes".to_string(),
                "Tomatoes".to_string(),
            ],
        );
        vocab.insert(COL_MARKET, vec!["Gikomba".to_string()]);
        vocab.insert(COL_ADMIN1, vec!["Nairobi".to_string()]);
        vocab.insert(
            COL_PRICE_TYPE,
            vec!["Retail".to_string(), "Wholesale".to_string()],
        );

        ForecastService::new(
            CommodityCatalog::default(),
            CategoricalEncoder::new(vocab),
            FeatureVectorBuilder::new(schema),
            Arc::new(EnsembleEstimator::new(fixed_members(member_values)).unwrap()),
            ThresholdRule::new(CommodityThresholds::default()),
        )
    }

    fn request(commodity: &str) -> PredictionRequest {
        PredictionRequest {
            date: "2025-12-05".to_string(),
            admin1: "Nairobi".to_string(),
            market: "Gikomba".to_string(),
            commodity: commodity.to_string(),
            price_type: PriceType::Retail,
            previous_price: 100.0,
        }
    }

    #[test]
    fn test_forecast_within_range() {
        let svc = service(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
        let forecast = svc.forecast(&request("cabbage")).unwrap();

        assert_eq!(forecast.predicted_per_kg, 55.0);
        assert_eq!(forecast.lower_bound, 14.5);
        assert_eq!(forecast.upper_bound, 94.5);
        assert_eq!(forecast.confidence_pct, 90.0);
        assert_eq!(forecast.error_margin, "+-39.5");
        assert_eq!(forecast.unit, "kg");
        assert!(!forecast.unreasonable);
        assert_eq!(forecast.note, "Prediction within normal range.");
    }

    #[test]
    fn test_forecast_flags_unreasonable_estimate() {
        // Onion ceiling is 13; a mean of 55 is flagged.
        let svc = service(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
        let forecast = svc.forecast(&request("Onions")).unwrap();

        assert!(forecast.unreasonable);
        assert!(forecast.note.contains("threshold of 13 per kg"));
    }

    #[test]
    fn test_unsupported_commodity_short_circuits() {
        let svc = service(&[10.0]);
        let err = svc.forecast(&request("mango")).unwrap_err();
        assert!(matches!(err, ForecastError::UnsupportedCommodity { .. }));
    }
}
