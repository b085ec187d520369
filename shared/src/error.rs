//! Error taxonomy for the calculation pipeline

use thiserror::Error;

use crate::models::Nutrient;

/// Errors raised while validating inputs, resolving doses or allocating products
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Please fill in all required fields with valid values ({field} is missing or invalid)")]
    MissingField { field: &'static str },

    #[error("{message}")]
    OutOfRange {
        field: &'static str,
        message: &'static str,
    },

    #[error("Invalid climate value: {0}")]
    InvalidClimate(String),

    #[error("Unable to determine fertilizer recommendations: {0}")]
    ResolutionFailure(String),

    #[error("The total percentage for {nutrient} fertilizers exceeds 100% ({total}%). Please adjust the values.")]
    PercentageOverflow { nutrient: Nutrient, total: f64 },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CalcError {
    /// Stable machine-readable code for display layers
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::InvalidClimate(_) => "INVALID_CLIMATE",
            CalcError::ResolutionFailure(_) => "RESOLUTION_FAILURE",
            CalcError::PercentageOverflow { .. } => "PERCENTAGE_OVERFLOW",
            CalcError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Form field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalcError::MissingField { field } | CalcError::OutOfRange { field, .. } => Some(field),
            CalcError::InvalidClimate(_) => Some("climate"),
            _ => None,
        }
    }

    /// Everything except a broken product catalog or table can be fixed by
    /// correcting the form and resubmitting.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, CalcError::Configuration(_))
    }
}

/// Result alias for pipeline operations
pub type CalcResult<T> = Result<T, CalcError>;
