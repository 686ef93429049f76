//! Error types for decant operations.
//!
//! [`DecantError`] covers both tiers of failure a request can hit: fetch
//! errors (network, timeout, upstream status) and processing errors
//! (parsing, extraction, configuration). [`DecantError::is_fetch_error`]
//! tells the two apart so callers can pick a status code.
//!
//! # Example
//!
//! ```rust
//! use decant_core::{DecantError, Result};
//!
//! fn require_html(html: &str) -> Result<&str> {
//!     if html.is_empty() {
//!         return Err(DecantError::NoContent);
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching, extraction and rendering.
#[derive(Error, Debug)]
pub enum DecantError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps DNS failures, refused connections, TLS problems and other
    /// transport-level errors.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The upstream server answered with a non-success status.
    #[error("HTTP status {status} for url ({url})")]
    HttpStatus { status: u16, url: String },

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, including invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Unknown page type override.
    #[error("Invalid page type: {0}. Valid options: article, forum, weixin")]
    InvalidPageType(String),

    /// The content engine failed on the page.
    #[error("Content extraction failed: {0}")]
    Extraction(String),

    /// No content could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Site rules could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DecantError {
    /// Whether this error came from retrieving the page rather than from
    /// processing it.
    ///
    /// Fetch errors are the caller's problem (bad URL, unreachable or
    /// failing upstream); everything else is a processing failure.
    pub fn is_fetch_error(&self) -> bool {
        match self {
            #[cfg(feature = "fetch")]
            DecantError::HttpError(_) => true,
            DecantError::HttpStatus { .. } | DecantError::Timeout { .. } | DecantError::InvalidUrl(_) => true,
            _ => false,
        }
    }
}

/// Result type alias for DecantError.
pub type Result<T> = std::result::Result<T, DecantError>;
