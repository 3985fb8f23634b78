//! Casting Predictor: process parameter prediction for casting temperature
//!
//! Maps a single casting temperature onto nine derived process parameters
//! and grades each against a fixed optimum range.
//!
//! ## Architecture
//!
//! - **Predictor**: fixed parameter table, optimum classification, aggregates
//! - **Config**: TOML server settings and optional adjusted-value seed
//! - **API**: Axum router exposing `/predict` and the homepage

pub mod api;
pub mod config;
pub mod predictor;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use predictor::{
    AdjustmentSource, AggregateMetrics, CastingTemperature, OptimumStatus, Parameter,
    ParameterPrediction, ParameterPredictor, PredictError, PredictionReport,
};
