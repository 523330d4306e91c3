use crate::domain::commodity::{Commodity, CommodityThresholds};

/// Sanity check of a point estimate against the per-commodity price ceiling.
pub struct ThresholdRule {
    thresholds: CommodityThresholds,
}

impl ThresholdRule {
    pub fn new(thresholds: CommodityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &CommodityThresholds {
        &self.thresholds
    }

    /// Strictly greater than the ceiling; equality stays reasonable.
    pub fn is_unreasonable(&self, commodity: Commodity, mean_estimate: f64) -> bool {
        mean_estimate > self.thresholds.ceiling(commodity)
    }

    /// One-line note for the forecast record.
    pub fn note(&self, commodity: Commodity, mean_estimate: f64) -> String {
        if self.is_unreasonable(commodity, mean_estimate) {
            format!(
                "Unreasonable: exceeds normal threshold of {} per kg.",
                self.thresholds.ceiling(commodity)
            )
        } else {
            "Prediction within normal range.".to_string()
        }
    }
}
