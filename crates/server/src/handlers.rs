//! Request handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use decant_core::{DecantError, ExtractRequest, OutputFormat, PageType, Pipeline};
use tracing::{info, warn};

use crate::types::*;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline: Arc::new(pipeline) }
    }
}

/// Failure of an API call, rendered as [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, detail: detail.into() }
    }

    pub fn gateway_timeout(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::GATEWAY_TIMEOUT, detail: detail.into() }
    }
}

/// Fetch failures are the caller's problem (400); anything after the page
/// arrived is ours (500).
impl From<DecantError> for ApiError {
    fn from(err: DecantError) -> Self {
        if err.is_fetch_error() {
            Self::bad_request(format!("Error fetching URL: {}", err))
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.detail))).into_response()
    }
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Welcome to decant content extractor API".to_string() })
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { healthy: true, version: env!("CARGO_PKG_VERSION").to_string() })
}

/// `GET /api/extract`
pub async fn extract(
    State(state): State<AppState>, Query(params): Query<ExtractParams>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let format = params.output_format.as_deref().map(OutputFormat::parse_lenient).unwrap_or_default();
    let page_type = params
        .html_type
        .as_deref()
        .map(str::parse::<PageType>)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let request = ExtractRequest::new(params.url).format(format).page_type(page_type);

    match state.pipeline.run(&request).await {
        Ok(extraction) => {
            info!(url = %extraction.url, page_type = %extraction.page_type, format = %extraction.format, "extracted");
            Ok(Json(extraction.into()))
        }
        Err(err) => {
            warn!(url = %request.url, error = %err, "extraction failed");
            Err(err.into())
        }
    }
}
