use thiserror::Error;

/// Errors raised by the forecast pipeline and its business rules.
///
/// Every variant is a deterministic, per-request validation rejection and is
/// surfaced to the caller as-is; nothing here is transient or retried.
/// Artifact-loading failures are a startup concern and abort the process
/// instead (see `infrastructure::artifacts`).
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid {field}: '{value}'. Valid values: {valid_values:?}")]
    UnknownCategoryValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },

    #[error("Commodity '{commodity}' not supported. Allowed: {allowed:?} (known aliases: {aliases:?})")]
    UnsupportedCommodity {
        commodity: String,
        allowed: Vec<String>,
        aliases: Vec<String>,
    },

    #[error("previous price must be greater than 0, got {value}")]
    InvalidPreviousPrice { value: f64 },

    #[error("Ensemble member {index} failed to predict: {reason}")]
    MemberFailure { index: usize, reason: String },

    #[error("{field} must be between 1 and 5, got {value}")]
    InvalidRating { field: String, value: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_value_formatting() {
        let error = ForecastError::UnknownCategoryValue {
            field: "market".to_string(),
            value: "Nowhere".to_string(),
            valid_values: vec!["Gikomba".to_string(), "Kongowea".to_string()],
        };

        let msg = error.to_string();
        assert!(msg.contains("market"));
        assert!(msg.contains("Nowhere"));
        assert!(msg.contains("Gikomba"));
        assert!(msg.contains("Kongowea"));
    }

    #[test]
    fn test_invalid_previous_price_formatting() {
        let error = ForecastError::InvalidPreviousPrice { value: -3.0 };

        let msg = error.to_string();
        assert!(msg.contains("greater than 0"));
        assert!(msg.contains("-3"));
    }
}
