//! HTTP error mapping.
//!
//! Every failure renders as `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::predictor::PredictError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("Invalid request body")]
    MalformedBody,

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Predict(PredictError::InvalidInput) | Self::MalformedBody => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Error body: `{ "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
