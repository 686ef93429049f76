//! Per-site lookup tables.
//!
//! Everything that depends on knowing a particular site lives here: which
//! hosts serve official-account articles, which class/id words mark a
//! forum, and which hosts want a specific `Referer` header. The built-in
//! defaults can be replaced by a JSON file.
//!
//! ```json
//! {
//!   "official_account_domains": ["mp.weixin.qq.com"],
//!   "forum_keywords": ["forum", "thread"],
//!   "referers": { "zhihu.com": "https://www.zhihu.com/" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{DecantError, Result};

const RULES_FILE: &str = "rules.json";

const OFFICIAL_ACCOUNT_DOMAINS: &[&str] = &["mp.weixin.qq.com"];

const FORUM_KEYWORDS: &[&str] = &[
    "forum",
    "thread",
    "bbs",
    "discuz",
    "topic",
    "reply",
    "replies",
    "post-list",
    "postlist",
    "comment-list",
    "论坛",
    "帖子",
    "回复",
    "楼主",
    "主题",
];

const REFERERS: &[(&str, &str)] = &[
    ("zhihu.com", "https://www.zhihu.com/"),
    ("zhimg.com", "https://www.zhihu.com/"),
    ("mp.weixin.qq.com", "https://mp.weixin.qq.com/"),
];

/// Site lookup tables used by the fetcher and the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteRules {
    /// Hosts whose pages are official-account articles.
    pub official_account_domains: Vec<String>,
    /// Lower-case words that mark a page as a forum when found among its
    /// class and id attributes.
    pub forum_keywords: Vec<String>,
    /// Referer header to send, keyed by domain. Subdomains match too.
    pub referers: BTreeMap<String, String>,
}

impl Default for SiteRules {
    fn default() -> Self {
        Self {
            official_account_domains: OFFICIAL_ACCOUNT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            forum_keywords: FORUM_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            referers: REFERERS
                .iter()
                .map(|(domain, referer)| (domain.to_string(), referer.to_string()))
                .collect(),
        }
    }
}

impl SiteRules {
    /// Loads rules from a JSON file. Fields missing from the file keep
    /// their built-in defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DecantError::FileNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| DecantError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Location of the user's rules file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("decant").join(RULES_FILE))
    }

    /// Loads `path` if given, otherwise the user's rules file when it
    /// exists, otherwise the built-in rules.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => {
                tracing::debug!(path = %default.display(), "loading site rules");
                Self::load(&default)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Whether the URL belongs to an official-account host.
    ///
    /// Unparsable URLs fall back to a substring check so a sloppy URL
    /// still classifies.
    pub fn is_official_account(&self, url: &str) -> bool {
        match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_lowercase)) {
            Some(host) => self.official_account_domains.iter().any(|d| host_matches(&host, d)),
            None => self.official_account_domains.iter().any(|d| url.contains(d.as_str())),
        }
    }

    /// Referer override for the given host, if one is configured.
    pub fn referer_for(&self, host: &str) -> Option<&str> {
        let host = host.to_lowercase();
        self.referers
            .iter()
            .find(|(domain, _)| host_matches(&host, domain))
            .map(|(_, referer)| referer.as_str())
    }
}

/// True when `host` is `domain` or one of its subdomains.
pub(crate) fn host_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rules() {
        let rules = SiteRules::default();
        assert!(rules.official_account_domains.contains(&"mp.weixin.qq.com".to_string()));
        assert!(rules.forum_keywords.contains(&"forum".to_string()));
        assert!(rules.forum_keywords.contains(&"论坛".to_string()));
    }

    #[test]
    fn test_host_matches() {
        assert!(host_matches("zhihu.com", "zhihu.com"));
        assert!(host_matches("www.zhihu.com", "zhihu.com"));
        assert!(host_matches("zhuanlan.zhihu.com", ".zhihu.com"));
        assert!(!host_matches("notzhihu.com", "zhihu.com"));
    }

    #[test]
    fn test_is_official_account() {
        let rules = SiteRules::default();
        assert!(rules.is_official_account("https://mp.weixin.qq.com/s/abc"));
        assert!(rules.is_official_account("mp.weixin.qq.com/s/abc"));
        assert!(!rules.is_official_account("https://example.com/mp.weixin"));
    }

    #[test]
    fn test_referer_for() {
        let rules = SiteRules::default();
        assert_eq!(rules.referer_for("www.zhihu.com"), Some("https://www.zhihu.com/"));
        assert_eq!(rules.referer_for("PIC1.ZHIMG.COM"), Some("https://www.zhihu.com/"));
        assert_eq!(rules.referer_for("example.com"), None);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"forum_keywords": ["board"]}}"#).unwrap();

        let rules = SiteRules::load(file.path()).unwrap();
        assert_eq!(rules.forum_keywords, vec!["board".to_string()]);
        assert_eq!(rules.official_account_domains, SiteRules::default().official_account_domains);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = SiteRules::load(file.path());
        assert!(matches!(result, Err(DecantError::ConfigError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SiteRules::load(Path::new("/nonexistent/rules.json"));
        assert!(matches!(result, Err(DecantError::FileNotFound(_))));
    }

    #[test]
    fn test_load_or_default_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"referers": {{}}}}"#).unwrap();

        let rules = SiteRules::load_or_default(Some(file.path())).unwrap();
        assert!(rules.referers.is_empty());
    }
}
