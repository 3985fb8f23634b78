//! Health and parameter-table endpoints

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use super::PredictorState;
use crate::predictor::{ParameterSpec, PARAMETER_COUNT};

// ============================================================================
// Health Endpoint
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub uptime_seconds: i64,
    /// True when adjusted values come from a fixed seed
    pub seeded: bool,
}

/// GET /health - Liveness check
pub async fn health_check(State(state): State<PredictorState>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now.to_rfc3339(),
        uptime_seconds: (now - state.started_at).num_seconds(),
        seeded: state.source.is_seeded(),
    })
}

// ============================================================================
// Parameter Table Endpoint
// ============================================================================

/// GET /parameters - Formula coefficients and optimum range per parameter
pub async fn get_parameters(
    State(state): State<PredictorState>,
) -> Json<&'static [ParameterSpec; PARAMETER_COUNT]> {
    Json(state.predictor.table())
}
