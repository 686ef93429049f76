pub mod classify;
pub mod decode;
pub mod engine;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod formatters;
#[cfg(feature = "fetch")]
pub mod pipeline;
pub mod rules;
pub mod sites;

pub use classify::{PageType, classify};
pub use decode::{DecodedHtml, decode_body};
pub use engine::{ContentEngine, Extracted, ReadabilityEngine};
pub use error::{DecantError, Result};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, FetchedPage, build_client, fetch_page};
#[cfg(feature = "fetch")]
pub use fetch::{fetch_file, fetch_stdin, fetch_url};
pub use formatters::{OutputFormat, cleanup_markdown, convert_to_markdown, convert_to_text, render};
#[cfg(feature = "fetch")]
pub use pipeline::{ExtractRequest, Extraction, Pipeline};
pub use rules::SiteRules;
pub use sites::{SiteExtractor, extractor_for};
