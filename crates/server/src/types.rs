//! HTTP API Request/Response Types

use decant_core::{Extraction, OutputFormat, PageType};
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/extract`
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractParams {
    /// Page to extract
    pub url: String,
    /// `html`, `markdown` or `text`. Unknown values render HTML.
    pub output_format: Option<String>,
    /// Page type override: `article`, `forum` or `weixin`
    pub html_type: Option<String>,
}

/// Successful extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub url: String,
    pub content: String,
    pub format: OutputFormat,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub success: bool,
}

impl From<Extraction> for ExtractResponse {
    fn from(extraction: Extraction) -> Self {
        Self {
            url: extraction.url,
            content: extraction.content,
            format: extraction.format,
            page_type: extraction.page_type,
            success: true,
        }
    }
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into(), success: false }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
}
