//! API route definitions
//!
//! - POST /predict - Parameter report for a casting temperature
//! - GET /parameters - Compiled-in parameter table
//! - GET /health - Liveness and version

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, PredictorState};

/// Create all API routes
pub fn api_routes(state: PredictorState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/parameters", get(handlers::get_parameters))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_api_routes_health() {
        let app = api_routes(PredictorState::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_routes_parameters() {
        let app = api_routes(PredictorState::default());

        let response = app
            .oneshot(Request::builder().uri("/parameters").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let rows = v.as_array().unwrap();
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0]["name"], "cooling_water_temp");
        assert_eq!(rows[0]["slope"], 0.5);
        assert_eq!(rows[0]["intercept"], 2.0);
        assert_eq!(rows[0]["optimum_min"], 20.0);
        assert_eq!(rows[0]["optimum_max"], 35.0);
    }

    #[tokio::test]
    async fn test_predict_rejects_get() {
        let app = api_routes(PredictorState::default());

        let response = app
            .oneshot(Request::builder().uri("/predict").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
