//! Parameter prediction endpoint

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::value::RawValue;
use tracing::{debug, warn};

use super::PredictorState;
use crate::api::error::ApiError;
use crate::predictor::{CastingTemperature, PredictionReport};

/// Request field carrying the casting temperature.
pub const CASTING_TEMP_FIELD: &str = "casting_temp";

/// Extract the casting temperature from a raw request body.
///
/// The body must be a JSON object. A missing `casting_temp` defaults to 0;
/// any other value goes through [`CastingTemperature::from_raw_json`].
pub fn parse_predict_body(body: &[u8]) -> Result<CastingTemperature, ApiError> {
    // Fields stay raw so an out-of-range number is a temperature error, not a body error.
    let fields: HashMap<String, Box<RawValue>> =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    match fields.get(CASTING_TEMP_FIELD) {
        None => Ok(CastingTemperature::DEFAULT),
        Some(raw) => Ok(CastingTemperature::from_raw_json(raw.get())?),
    }
}

/// POST /predict - Compute the parameter report for one casting temperature
///
/// The body is read as JSON regardless of `Content-Type`.
pub async fn predict(
    State(state): State<PredictorState>,
    body: Bytes,
) -> Result<Json<PredictionReport>, ApiError> {
    let casting_temp = parse_predict_body(&body).map_err(|e| {
        warn!(error = %e, "Rejected /predict request");
        e
    })?;

    let report = state.source.compute(&state.predictor, casting_temp);
    debug!(
        casting_temp = casting_temp.value(),
        optimum_predicted_pct = report.metrics.percentage_optimum_predicted,
        "Served /predict"
    );
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::PredictError;

    #[test]
    fn test_parse_number_and_string() {
        assert_eq!(parse_predict_body(br#"{"casting_temp": 30}"#).unwrap().value(), 30.0);
        assert_eq!(parse_predict_body(br#"{"casting_temp": "30.5"}"#).unwrap().value(), 30.5);
    }

    #[test]
    fn test_parse_missing_field_defaults_to_zero() {
        assert_eq!(parse_predict_body(b"{}").unwrap().value(), 0.0);
        assert_eq!(parse_predict_body(br#"{"other": 1}"#).unwrap().value(), 0.0);
    }

    #[test]
    fn test_parse_invalid_temperature() {
        for body in [
            &br#"{"casting_temp": "abc"}"#[..],
            br#"{"casting_temp": null}"#,
            br#"{"casting_temp": false}"#,
            br#"{"casting_temp": 1e400}"#,
            br#"{"casting_temp": -1e400}"#,
        ] {
            assert!(matches!(
                parse_predict_body(body),
                Err(ApiError::Predict(PredictError::InvalidInput))
            ));
        }
    }

    #[test]
    fn test_parse_malformed_body() {
        for body in [&b""[..], b"not json", b"[30]", b"30"] {
            assert!(matches!(parse_predict_body(body), Err(ApiError::MalformedBody)));
        }
    }
}
