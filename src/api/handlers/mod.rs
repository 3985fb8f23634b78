//! API route handlers
//!
//! Request handling logic for all API endpoints:
//! - Parameter prediction for a casting temperature
//! - Service health and the static parameter table

mod predict;
mod status;

pub use predict::*;
pub use status::*;

use chrono::{DateTime, Utc};

use crate::predictor::{AdjustmentSource, ParameterPredictor};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Debug, Clone)]
pub struct PredictorState {
    /// Evaluator over the compiled-in parameter table
    pub predictor: ParameterPredictor,
    /// Entropy for adjusted values
    pub source: AdjustmentSource,
    /// Process start, for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl PredictorState {
    pub fn new(source: AdjustmentSource) -> Self {
        Self {
            predictor: ParameterPredictor::new(),
            source,
            started_at: Utc::now(),
        }
    }
}

impl Default for PredictorState {
    fn default() -> Self {
        Self::new(AdjustmentSource::default())
    }
}
