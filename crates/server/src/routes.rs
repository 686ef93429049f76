//! HTTP API Route Definitions

use std::time::Duration;

use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers::{self, ApiError, AppState};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/extract", get(handlers::extract))
        .with_state(state)
}

/// Router with the configured middleware stack applied.
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let mut app = with_timeout(create_router(state), config.request_timeout());

    if config.cors {
        let cors = CorsLayer::new().allow_methods([Method::GET, Method::OPTIONS]).allow_headers(Any).allow_origin(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

/// Abort requests that run longer than `timeout` with a 504 JSON error.
pub fn with_timeout(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, timeout))
        .layer(middleware::map_response(timeout_body))
}

/// The timeout layer answers with an empty body; give it the error shape.
async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::GATEWAY_TIMEOUT && !response.headers().contains_key(header::CONTENT_TYPE) {
        return ApiError::gateway_timeout("Request timed out").into_response();
    }
    response
}
