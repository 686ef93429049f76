//! Rendering of an extracted HTML fragment into the requested output format.

pub mod markdown;
pub mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Result;

pub use markdown::{cleanup_markdown, convert_to_markdown};
pub use text::convert_to_text;

/// Output format for extracted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The extracted fragment unchanged.
    Html,
    /// Markdown with cleanup applied.
    Markdown,
    /// Visible text, one block per line.
    #[default]
    Text,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Text => "text",
        }
    }

    /// Parses a format tag, treating anything unrecognized as HTML
    /// pass-through.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Html)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: markdown, html, text", s)),
        }
    }
}

/// Render an HTML fragment in the given format.
///
/// Deterministic and free of I/O: the same fragment and format always
/// produce the same string.
pub fn render(html: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(html.to_string()),
        OutputFormat::Markdown => convert_to_markdown(html),
        OutputFormat::Text => Ok(convert_to_text(html)),
    }
}
