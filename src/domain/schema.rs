use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column the previous-period price is placed into.
pub const COL_PRICE_LAG_1: &str = "price_lag_1";
pub const COL_COMMODITY: &str = "commodity";
pub const COL_MARKET: &str = "market";
pub const COL_ADMIN1: &str = "admin1";
pub const COL_PRICE_TYPE: &str = "pricetype";

/// Ordered column contract of the trained artifact set.
///
/// `feature_columns` order MUST match exactly the order used at training
/// time; any change here is a breaking change for deployed models.
/// `categorical_columns` names the subset that passes through label
/// encoding; everything else is consumed as a raw numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSchema {
    pub feature_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

impl ModelSchema {
    pub fn width(&self) -> usize {
        self.feature_columns.len()
    }
}

/// Per-column trained vocabularies.
///
/// A value's integer code is its index in the column's ordered class list,
/// matching the label encoders the model was trained with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularySet {
    columns: HashMap<String, Vec<String>>,
}

impl VocabularySet {
    pub fn new(columns: HashMap<String, Vec<String>>) -> Self {
        Self { columns }
    }

    pub fn classes(&self, column: &str) -> Option<&[String]> {
        self.columns.get(column).map(|c| c.as_slice())
    }

    pub fn insert(&mut self, column: impl Into<String>, classes: Vec<String>) {
        self.columns.insert(column.into(), classes);
    }
}

/// Fixed-length numeric input the ensemble consumes, in trained column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
