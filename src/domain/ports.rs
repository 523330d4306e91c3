use crate::domain::schema::FeatureVector;

/// Interface for one member of the loaded regression ensemble.
///
/// The estimator assumes nothing about a member beyond a single scalar
/// prediction per vector, so any predictor technology can stand in:
/// smartcore trees in production, deterministic stubs in tests.
/// Implementations must be read-only after construction; the same member
/// set is shared across concurrent requests.
pub trait EnsembleMember: Send + Sync {
    /// Predict a price (native currency per kg) for the given vector.
    fn predict(&self, vector: &FeatureVector) -> Result<f64, String>;
}
