//! Input records passed between the form boundary and the pipeline

use serde::{Deserialize, Serialize};

/// Soil and climate values exactly as entered on the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSoilInput {
    pub climate: Option<String>,
    #[serde(rename = "yield")]
    pub yield_value: Option<String>,
    pub organic_carbon: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
}

impl RawSoilInput {
    pub fn new(
        climate: &str,
        yield_value: &str,
        organic_carbon: &str,
        phosphorus: &str,
        potassium: &str,
    ) -> Self {
        Self {
            climate: Some(climate.to_string()),
            yield_value: Some(yield_value.to_string()),
            organic_carbon: Some(organic_carbon.to_string()),
            phosphorus: Some(phosphorus.to_string()),
            potassium: Some(potassium.to_string()),
        }
    }
}

/// Parsed soil and climate values.
///
/// Produced by [`crate::validate_inputs`]; numeric fields are always finite.
/// The climate is kept as entered and checked against the tables during
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilTestInput {
    pub climate: String,
    #[serde(rename = "yield")]
    pub yield_value: f64,
    pub organic_carbon: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}
