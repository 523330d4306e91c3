use crate::domain::errors::ForecastError;
use crate::domain::ports::EnsembleMember;
use crate::domain::schema::FeatureVector;
use crate::domain::types::EnsembleEstimate;
use statrs::statistics::{Data, Distribution};

/// Nominal share of member predictions bracketed by the 5th/95th split.
/// Hard-coded to match the deployed behavior; deliberately not derived from
/// the percentile pair.
pub const INTERVAL_COVERAGE: f64 = 0.90;

const LOW_PERCENTILE: f64 = 5.0;
const HIGH_PERCENTILE: f64 = 95.0;

/// Reduces an ensemble of independently-trained predictors to a point
/// estimate plus an empirical confidence interval.
///
/// Read-only after construction; safe to share across threads serving
/// parallel requests.
pub struct EnsembleEstimator {
    members: Vec<Box<dyn EnsembleMember>>,
}

impl EnsembleEstimator {
    /// Build an estimator over a non-empty member set. An empty ensemble is
    /// an artifact problem and belongs to startup, not the request path.
    pub fn new(members: Vec<Box<dyn EnsembleMember>>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !members.is_empty(),
            "ensemble must contain at least one member"
        );
        Ok(Self { members })
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Collect exactly one scalar per member, then reduce: arithmetic mean,
    /// 5th and 95th percentile bounds.
    pub fn estimate(&self, vector: &FeatureVector) -> Result<EnsembleEstimate, ForecastError> {
        let mut predictions = Vec::with_capacity(self.members.len());
        for (index, member) in self.members.iter().enumerate() {
            let value = member
                .predict(vector)
                .map_err(|reason| ForecastError::MemberFailure { index, reason })?;
            predictions.push(value);
        }

        let mean = Data::new(predictions.clone()).mean().unwrap_or(0.0);

        let mut sorted = predictions;
        sorted.sort_by(|a, b| a.total_cmp(b));
        let low = percentile(&sorted, LOW_PERCENTILE);
        let high = percentile(&sorted, HIGH_PERCENTILE);

        Ok(EnsembleEstimate {
            mean,
            low,
            high,
            interval_coverage: INTERVAL_COVERAGE,
        })
    }
}

/// Percentile by linear interpolation between order statistics: for
/// percentile `p` over `n` ascending samples, rank = p/100 * (n - 1),
/// interpolated between the two bracketing samples.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::{FailingMember, FixedMember, fixed_members};

    fn vector() -> FeatureVector {
        FeatureVector::new(vec![0.0; 4])
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let sorted: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
        // rank = 0.05 * 9 = 0.45 between 10 and 20
        assert!((percentile(&sorted, 5.0) - 14.5).abs() < 1e-9);
        // rank = 0.95 * 9 = 8.55 between 90 and 100
        assert!((percentile(&sorted, 95.0) - 94.5).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 100.0), 100.0);
    }

    #[test]
    fn test_estimate_on_synthetic_ensemble() {
        let members = fixed_members(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
        let estimator = EnsembleEstimator::new(members).unwrap();

        let estimate = estimator.estimate(&vector()).unwrap();
        assert!((estimate.mean - 55.0).abs() < 1e-9);
        assert!((estimate.low - 14.5).abs() < 1e-9);
        assert!((estimate.high - 94.5).abs() < 1e-9);
        assert_eq!(estimate.interval_coverage, INTERVAL_COVERAGE);
    }

    #[test]
    fn test_bounds_order() {
        let members = fixed_members(&[42.0, 7.5, 63.2, 18.9, 55.1]);
        let estimator = EnsembleEstimator::new(members).unwrap();

        let estimate = estimator.estimate(&vector()).unwrap();
        assert!(estimate.low <= estimate.mean);
        assert!(estimate.mean <= estimate.high);
    }

    #[test]
    fn test_single_member_collapses_interval() {
        let estimator = EnsembleEstimator::new(fixed_members(&[33.0])).unwrap();
        let estimate = estimator.estimate(&vector()).unwrap();
        assert_eq!(estimate.mean, 33.0);
        assert_eq!(estimate.low, 33.0);
        assert_eq!(estimate.high, 33.0);
    }

    #[test]
    fn test_member_failure_carries_index() {
        let members: Vec<Box<dyn EnsembleMember>> = vec![
            Box::new(FixedMember::new(10.0)),
            Box::new(FailingMember::new("shape mismatch")),
        ];
        let estimator = EnsembleEstimator::new(members).unwrap();

        let err = estimator.estimate(&vector()).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::MemberFailure { index: 1, .. }
        ));
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        assert!(EnsembleEstimator::new(Vec::new()).is_err());
    }
}
