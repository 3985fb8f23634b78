//! REST API module using Axum
//!
//! Provides the HTTP surface of the casting predictor:
//! - `POST /predict` plus read-only introspection endpoints
//! - Homepage served via `rust-embed` (compiled into the binary)

pub mod error;
pub mod handlers;
mod routes;

pub use error::ApiError;
pub use handlers::PredictorState;

use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::Embed;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Homepage assets compiled from `static/`.
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Serve a static asset; `/` maps to `index.html`.
async fn serve_asset(uri: Uri) -> Response {
    let path = match uri.path().trim_start_matches('/') {
        "" => "index.html",
        p => p,
    };

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => ApiError::NotFound.into_response(),
    }
}

/// Build the CORS layer. No configured origins means any origin is allowed.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.trim().parse().ok())
            .collect();
        tracing::info!(origins = ?origins, "CORS: allowing configured origins");
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the complete application router with API and homepage serving.
pub fn create_app(state: PredictorState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::api_routes(state))
        .fallback(serve_asset)
        // Middleware
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&server.cors_origins))
}
