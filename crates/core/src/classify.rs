//! Coarse page-type classification.
//!
//! The page type is only a hint for the content engine. Rules are checked
//! in order and the first match wins:
//!
//! 1. the URL host is an official-account host → [`PageType::Weixin`]
//! 2. the page's class tokens and ids contain a forum keyword → [`PageType::Forum`]
//! 3. anything else → [`PageType::Article`]

use std::fmt;
use std::str::FromStr;

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::DecantError;
use crate::rules::SiteRules;

/// Extraction profile handed to the content engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// Regular article or blog post.
    #[default]
    Article,
    /// Discussion board or thread page.
    Forum,
    /// WeChat official-account article.
    Weixin,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Forum => "forum",
            Self::Weixin => "weixin",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = DecantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "article" => Ok(Self::Article),
            "forum" => Ok(Self::Forum),
            "weixin" | "wechat" => Ok(Self::Weixin),
            _ => Err(DecantError::InvalidPageType(s.to_string())),
        }
    }
}

/// Classify a page from its HTML and URL.
pub fn classify(html: &str, url: &str, rules: &SiteRules) -> PageType {
    if rules.is_official_account(url) {
        return PageType::Weixin;
    }

    let hints = class_id_hints(html);
    if let Some(keyword) = rules.forum_keywords.iter().find(|k| hints.contains(&k.to_lowercase())) {
        tracing::debug!(keyword = %keyword, "forum keyword found in class/id attributes");
        return PageType::Forum;
    }

    PageType::Article
}

/// All class tokens and id values in the document, lower-cased and joined
/// with single spaces.
fn class_id_hints(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut hints = Vec::new();

    for node in document.root_element().descendants() {
        let Some(element) = node.value().as_element() else {
            continue;
        };

        hints.extend(element.classes().map(str::to_lowercase));
        if let Some(id) = element.id() {
            hints.push(id.to_lowercase());
        }
    }

    hints.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://mp.weixin.qq.com/s/abc123", "<div class='forum'>x</div>")]
    #[case("https://mp.weixin.qq.com/s?__biz=MzA", "<p>plain</p>")]
    #[case("http://MP.WEIXIN.QQ.COM/s/x", "")]
    fn test_official_account_wins(#[case] url: &str, #[case] html: &str) {
        assert_eq!(classify(html, url, &SiteRules::default()), PageType::Weixin);
    }

    #[rstest]
    #[case("<div class=\"forum\">x</div>")]
    #[case("<div class=\"main Thread-List\">x</div>")]
    #[case("<ul id=\"postlist\"><li>x</li></ul>")]
    #[case("<div class=\"论坛\">x</div>")]
    #[case("<div class=\"reply-box\">x</div>")]
    fn test_forum_hints(#[case] html: &str) {
        assert_eq!(classify(html, "https://example.com/t/1", &SiteRules::default()), PageType::Forum);
    }

    #[test]
    fn test_default_is_article() {
        let html = "<html><body><article class=\"post-body\"><p>Hello</p></article></body></html>";
        assert_eq!(classify(html, "https://example.com/blog/1", &SiteRules::default()), PageType::Article);
    }

    #[test]
    fn test_text_content_is_not_a_hint() {
        let html = "<p>Welcome to the forum</p>";
        assert_eq!(classify(html, "https://example.com", &SiteRules::default()), PageType::Article);
    }

    #[test]
    fn test_custom_keywords() {
        let rules = SiteRules { forum_keywords: vec!["board".into()], ..Default::default() };
        assert_eq!(classify("<div class=\"board\"></div>", "https://e.com", &rules), PageType::Forum);
        assert_eq!(classify("<div class=\"forum\"></div>", "https://e.com", &rules), PageType::Article);
    }

    #[test]
    fn test_class_id_hints() {
        let hints = class_id_hints("<div id=\"Main\" class=\"A b\"><span class=\"c\"></span></div>");
        let tokens: Vec<&str> = hints.split(' ').collect();
        assert_eq!(tokens.len(), 4);
        for token in ["a", "b", "main", "c"] {
            assert!(tokens.contains(&token), "missing {token}");
        }
    }

    #[test]
    fn test_page_type_from_str() {
        assert_eq!("article".parse::<PageType>().unwrap(), PageType::Article);
        assert_eq!("Forum".parse::<PageType>().unwrap(), PageType::Forum);
        assert_eq!("weixin".parse::<PageType>().unwrap(), PageType::Weixin);
        assert!(matches!("blog".parse::<PageType>(), Err(DecantError::InvalidPageType(_))));
    }

    #[test]
    fn test_page_type_serde() {
        assert_eq!(serde_json::to_string(&PageType::Weixin).unwrap(), "\"weixin\"");
        assert_eq!(serde_json::from_str::<PageType>("\"forum\"").unwrap(), PageType::Forum);
    }
}
