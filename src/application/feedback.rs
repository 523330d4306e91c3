use crate::domain::errors::ForecastError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// User feedback on a delivered forecast. Ratings use a 1-5 scale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackSubmission {
    pub user_id: Option<String>,
    pub prediction_id: Option<String>,
    pub actual_price: Option<f64>,
    pub accuracy_rating: Option<u8>,
    pub usefulness_rating: Option<u8>,
    pub comments: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReceipt {
    pub feedback_id: String,
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Validate a submission and mint a receipt.
///
/// Feedback is acknowledged but not stored; durable collection is out of
/// scope, so the receipt is the whole transaction.
pub fn acknowledge(submission: &FeedbackSubmission) -> Result<FeedbackReceipt, ForecastError> {
    for (field, rating) in [
        ("accuracy_rating", submission.accuracy_rating),
        ("usefulness_rating", submission.usefulness_rating),
    ] {
        if let Some(value) = rating
            && !(1..=5).contains(&value)
        {
            return Err(ForecastError::InvalidRating {
                field: field.to_string(),
                value,
            });
        }
    }

    let timestamp = submission.timestamp.unwrap_or_else(Utc::now);
    let id = Uuid::new_v4().simple().to_string();
    let feedback_id = format!("FB-{}", &id[..8]);

    info!(feedback_id = %feedback_id, "feedback received");

    Ok(FeedbackReceipt {
        feedback_id,
        status: "success".to_string(),
        message: "Thank you for your feedback! Your input helps us improve our predictions."
            .to_string(),
        timestamp,
    })
}
