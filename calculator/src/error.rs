//! Error handling for the fertilizer calculator
//!
//! Every failure is turned into a single [`ErrorResponse`] for the display
//! layer; no partial result is ever shown next to an error.

use serde::Serialize;
use shared::CalcError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input, lookup and allocation errors
    #[error(transparent)]
    Calculation(#[from] CalcError),

    #[error("Calculated value {0} kg/ha is too large to display")]
    ValueOutOfRange(f64),

    #[error("Invalid form store snapshot: {0}")]
    StoreSnapshot(#[from] serde_json::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    // Internal errors
    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

/// Error envelope handed to the display layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub user_correctable: bool,
}

impl AppError {
    /// Whether correcting the form and resubmitting can clear the error
    pub fn is_user_correctable(&self) -> bool {
        match self {
            AppError::Calculation(err) => err.is_user_correctable(),
            AppError::ValueOutOfRange(_) | AppError::StoreSnapshot(_) => true,
            _ => false,
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        let (code, message, field) = match self {
            AppError::Calculation(err) => (
                err.code().to_string(),
                err.to_string(),
                err.field().map(str::to_string),
            ),
            AppError::ValueOutOfRange(_) => (
                "VALUE_OUT_OF_RANGE".to_string(),
                format!("{}. Please check the fertilizer amounts.", self),
                None,
            ),
            AppError::StoreSnapshot(err) => (
                "INVALID_STORE_SNAPSHOT".to_string(),
                format!("Stored form data could not be read: {}", err),
                None,
            ),
            AppError::Configuration(msg) => (
                "CONFIGURATION_ERROR".to_string(),
                format!("Configuration error: {}", msg),
                None,
            ),
            AppError::ConfigLoad(err) => (
                "CONFIGURATION_ERROR".to_string(),
                format!("Failed to load configuration: {}", err),
                None,
            ),
            AppError::InternalError(_) => (
                "INTERNAL_ERROR".to_string(),
                "An internal error occurred".to_string(),
                None,
            ),
        };

        ErrorDetail {
            code,
            message,
            field,
            user_correctable: self.is_user_correctable(),
        }
    }

    /// Log the error and build the display envelope
    pub fn into_response(self) -> ErrorResponse {
        if self.is_user_correctable() {
            tracing::warn!("Rejected input: {}", self);
        } else {
            tracing::error!("Error: {:?}", self);
        }

        ErrorResponse {
            error: self.detail(),
        }
    }
}

/// Result type alias for service operations
pub type AppResult<T> = Result<T, AppError>;
