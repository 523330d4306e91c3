//! Deterministic ensemble stubs for tests and local runs.

use crate::domain::ports::EnsembleMember;
use crate::domain::schema::FeatureVector;

/// Member that always predicts the same value.
pub struct FixedMember {
    value: f64,
}

impl FixedMember {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl EnsembleMember for FixedMember {
    fn predict(&self, _vector: &FeatureVector) -> Result<f64, String> {
        Ok(self.value)
    }
}

/// Member that always fails, for exercising the error path.
pub struct FailingMember {
    reason: String,
}

impl FailingMember {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl EnsembleMember for FailingMember {
    fn predict(&self, _vector: &FeatureVector) -> Result<f64, String> {
        Err(self.reason.clone())
    }
}

/// Convenience: one `FixedMember` per value.
pub fn fixed_members(values: &[f64]) -> Vec<Box<dyn EnsembleMember>> {
    values
        .iter()
        .map(|&value| Box::new(FixedMember::new(value)) as Box<dyn EnsembleMember>)
        .collect()
}
