//! End-to-end extraction for a single URL.
//!
//! ```rust,no_run
//! use decant_core::{ExtractRequest, OutputFormat, Pipeline};
//!
//! # async fn run() -> decant_core::Result<()> {
//! let pipeline = Pipeline::new(Default::default())?;
//! let request = ExtractRequest::new("https://example.com/post").format(OutputFormat::Markdown);
//! let extraction = pipeline.run(&request).await?;
//! println!("{}", extraction.content);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::Client;
use serde::Serialize;

use crate::classify::{PageType, classify};
use crate::engine::{ContentEngine, ReadabilityEngine};
use crate::fetch::{FetchConfig, FetchedPage, build_client, fetch_page};
use crate::formatters::{OutputFormat, render};
use crate::sites;
use crate::{DecantError, Result};

/// What to extract and how to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    pub url: String,
    pub format: OutputFormat,
    /// Page type override. When `None` the page is classified.
    pub page_type: Option<PageType>,
}

impl ExtractRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), format: OutputFormat::default(), page_type: None }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn page_type(mut self, page_type: Option<PageType>) -> Self {
        self.page_type = page_type;
        self
    }
}

/// Rendered result of one extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub url: String,
    pub content: String,
    pub format: OutputFormat,
    #[serde(rename = "type")]
    pub page_type: PageType,
}

/// Fetch → classify → extract → render.
///
/// Holds the HTTP client and the engine; cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct Pipeline {
    client: Client,
    config: FetchConfig,
    engine: Arc<dyn ContentEngine>,
}

impl Pipeline {
    /// Pipeline with the default Readability engine.
    pub fn new(config: FetchConfig) -> Result<Self> {
        Self::with_engine(config, Arc::new(ReadabilityEngine::new()))
    }

    pub fn with_engine(config: FetchConfig, engine: Arc<dyn ContentEngine>) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config, engine })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches a page with the pipeline's client and settings.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        fetch_page(&self.client, url, &self.config).await
    }

    /// Runs a request end to end. Any stage failing aborts the request.
    ///
    /// DOM work runs on tokio's blocking pool so a large page does not
    /// stall the async workers.
    #[tracing::instrument(skip(self, request), fields(url = %request.url, format = %request.format))]
    pub async fn run(&self, request: &ExtractRequest) -> Result<Extraction> {
        let page = self.fetch(&request.url).await?;

        let pipeline = self.clone();
        let request = request.clone();
        let span = tracing::Span::current();
        tokio::task::spawn_blocking(move || {
            span.in_scope(|| pipeline.process(&request.url, &page.html, request.format, request.page_type))
        })
        .await
        .map_err(|e| DecantError::Extraction(format!("extraction task failed: {}", e)))?
    }

    /// Everything after the fetch: classification, extraction and rendering.
    pub fn process(
        &self, url: &str, html: &str, format: OutputFormat, page_type: Option<PageType>,
    ) -> Result<Extraction> {
        let page_type = page_type.unwrap_or_else(|| classify(html, url, &self.config.rules));
        tracing::debug!(%page_type, "page classified");

        if format == OutputFormat::Markdown
            && let Some(extractor) = sites::extractor_for(url)
        {
            tracing::debug!(site = extractor.name(), "using site extractor");
            let content = extractor.to_markdown(html, url);
            return Ok(Extraction { url: url.to_string(), content, format, page_type });
        }

        let extracted = self.engine.extract(html, url, page_type)?;
        let content = render(&extracted.html, format)?;

        tracing::debug!(chars = content.chars().count(), "content rendered");
        Ok(Extraction { url: url.to_string(), content, format, page_type })
    }
}
