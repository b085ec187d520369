//! Wheat Fertilizer Calculator - host-side service
//!
//! Wraps the shared calculation pipeline with configuration, structured
//! logging, error envelopes and report formatting for the display layer.

pub mod config;
pub mod error;
pub mod report;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorResponse};
pub use report::RecommendationReport;
pub use services::RecommendationService;

/// Load `.env` and configuration, install tracing and build the service
pub fn bootstrap() -> anyhow::Result<(Config, RecommendationService)> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    config.validate()?;

    telemetry::init_tracing(&config.logging)?;

    tracing::info!("Starting Wheat Fertilizer Calculator");
    tracing::info!("Environment: {}", config.environment);

    let service = RecommendationService::new(&config.calculator)?;
    Ok((config, service))
}
