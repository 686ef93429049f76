//! Hand-written extractors for sites the generic engine handles badly.
//!
//! A site extractor reads the whole page and emits Markdown directly,
//! bypassing both the content engine and the HTML→Markdown converter.

pub mod zhihu;

use url::Url;

use crate::rules::host_matches;

/// A structured extractor for one site.
pub trait SiteExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Domains served by this extractor. Subdomains match too.
    fn domains(&self) -> &'static [&'static str];

    /// Render the page as Markdown. Never fails; missing pieces are
    /// left out.
    fn to_markdown(&self, html: &str, url: &str) -> String;

    fn matches(&self, url: &str) -> bool {
        let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_lowercase)) else {
            return false;
        };
        self.domains().iter().any(|domain| host_matches(&host, domain))
    }
}

static EXTRACTORS: &[&dyn SiteExtractor] = &[&zhihu::Zhihu];

/// The site extractor responsible for a URL, if any.
pub fn extractor_for(url: &str) -> Option<&'static dyn SiteExtractor> {
    EXTRACTORS.iter().copied().find(|extractor| extractor.matches(url))
}
