use crate::application::encoder::{CategoricalEncoder, title_case};
use crate::domain::commodity::CommodityCatalog;
use crate::domain::errors::ForecastError;
use crate::domain::schema::{
    COL_ADMIN1, COL_COMMODITY, COL_MARKET, COL_PRICE_LAG_1, COL_PRICE_TYPE, FeatureVector,
    ModelSchema,
};
use crate::domain::types::PredictionRequest;
use std::collections::HashMap;

/// Assembles the ordered numeric input the ensemble consumes.
///
/// Pure given its inputs; performs no I/O. Steps run in a fixed order:
/// normalize the categorical fields, place the previous price in the lag
/// slot, encode every categorical column the artifact declares (failing
/// fast on the first unknown value, so no partial vector ever escapes),
/// then project onto the trained column order.
pub struct FeatureVectorBuilder {
    schema: ModelSchema,
}

impl FeatureVectorBuilder {
    pub fn new(schema: ModelSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn build(
        &self,
        request: &PredictionRequest,
        encoder: &CategoricalEncoder,
        catalog: &CommodityCatalog,
    ) -> Result<FeatureVector, ForecastError> {
        // Aliases resolve on the lowercased raw value before title-casing;
        // values outside the universe keep their title-cased form so the
        // strict encode below reports them against the vocabulary.
        let commodity = match catalog.try_resolve(&request.commodity) {
            Some(resolved) => resolved.label().to_string(),
            None => title_case(&request.commodity),
        };
        let market = encoder.canonicalize(COL_MARKET, &request.market);
        let admin1 = encoder.canonicalize(COL_ADMIN1, &request.admin1);

        let mut values: HashMap<&str, f64> = HashMap::new();
        values.insert(COL_PRICE_LAG_1, request.previous_price);

        let categorical: HashMap<&str, String> = HashMap::from([
            (COL_COMMODITY, commodity),
            (COL_MARKET, market),
            (COL_ADMIN1, admin1),
            (COL_PRICE_TYPE, request.price_type.label().to_string()),
        ]);

        for column in &self.schema.categorical_columns {
            if let Some(value) = categorical.get(column.as_str()) {
                let code = encoder.encode(column, value)?;
                values.insert(column.as_str(), code as f64);
            }
        }

        // Columns the request does not set project to 0.0. A zero is also a
        // legitimate encoded category index, so this can mask a missing
        // assignment; the trained artifact was built with the same
        // convention, so it stays.
        let projected = self
            .schema
            .feature_columns
            .iter()
            .map(|column| values.get(column.as_str()).copied().unwrap_or(0.0))
            .collect();

        Ok(FeatureVector::new(projected))
    }
}
