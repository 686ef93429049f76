//! Adapter around the general-purpose content extraction engine.
//!
//! The engine itself lives in `dom_smoothie`; this module only decides
//! how each [`PageType`] tunes it and turns its output into the one
//! result type the rest of the crate works with, [`Extracted`].

use dom_smoothie::{Config, Readability, ReadabilityError};

use crate::classify::PageType;
use crate::{DecantError, Result};

/// Main-content fragment produced by an engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extracted {
    /// Main content as an HTML fragment. Empty when nothing was found.
    pub html: String,
    /// Page title, when the engine found one.
    pub title: Option<String>,
}

/// A content extraction engine.
///
/// Implementations take the full page and return its main-content
/// fragment. They must not perform I/O.
pub trait ContentEngine: Send + Sync {
    fn extract(&self, html: &str, base_url: &str, profile: PageType) -> Result<Extracted>;
}

/// [`ContentEngine`] backed by `dom_smoothie`'s Readability port.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityEngine;

impl ReadabilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Engine configuration for a profile.
    ///
    /// Forum pages are many short posts, so the per-candidate character
    /// threshold is lowered and more candidates are kept. Official-account
    /// articles carry heavy markup and get a larger element budget.
    fn config_for(profile: PageType) -> Config {
        match profile {
            PageType::Article => Config { max_elements_to_parse: 9000, ..Default::default() },
            PageType::Forum => {
                Config { max_elements_to_parse: 9000, char_threshold: 100, n_top_candidates: 10, ..Default::default() }
            }
            PageType::Weixin => Config { max_elements_to_parse: usize::MAX, ..Default::default() },
        }
    }
}

impl ContentEngine for ReadabilityEngine {
    fn extract(&self, html: &str, base_url: &str, profile: PageType) -> Result<Extracted> {
        let url = (!base_url.is_empty()).then_some(base_url);
        let mut readability = Readability::new(html, url, Some(Self::config_for(profile)))
            .map_err(|e| DecantError::Extraction(e.to_string()))?;

        let article = match readability.parse() {
            Ok(article) => article,
            Err(ReadabilityError::GrabFailed) => {
                tracing::debug!(base_url, %profile, "no main content found");
                return Ok(Extracted::default());
            }
            Err(e) => return Err(DecantError::Extraction(e.to_string())),
        };

        let title = Some(article.title.trim().to_string()).filter(|t| !t.is_empty());
        Ok(Extracted { html: article.content.to_string(), title })
    }
}
