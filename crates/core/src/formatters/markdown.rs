use std::sync::LazyLock;

use regex::Regex;

use crate::Result;

/// Alt text given to images that have none.
pub const IMAGE_PLACEHOLDER: &str = "图片";

static BLANK_LINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*){2,}").expect("valid blank-line pattern"));
static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline pattern"));
static EQUALS_RULES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"={3,}").expect("valid rule pattern"));

/// Convert an HTML fragment to cleaned-up Markdown.
pub fn convert_to_markdown(html: &str) -> Result<String> {
    let markdown = html_to_markdown(html)?;
    Ok(cleanup_markdown(&markdown))
}

/// Convert HTML to Markdown using htmd crate
#[cfg(feature = "markdown")]
fn html_to_markdown(html: &str) -> Result<String> {
    htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript"])
        .build()
        .convert(html)
        .map_err(|e| crate::DecantError::HtmlParseError(e.to_string()))
}

/// Fallback when the markdown feature is disabled: plain text.
#[cfg(not(feature = "markdown"))]
fn html_to_markdown(html: &str) -> Result<String> {
    Ok(super::text::convert_to_text(html))
}

/// Tidy converter output.
///
/// Steps run in a fixed order: collapse blank-line runs, trim every line,
/// drop `===` rule runs, give empty-alt images the placeholder alt text.
/// Rule removal can expose whitespace at line edges and leave new blank-line
/// runs, so lines are trimmed and collapsed once more at the end. The pass
/// is idempotent.
pub fn cleanup_markdown(markdown: &str) -> String {
    let collapsed = BLANK_LINE_RUNS.replace_all(markdown, "\n\n");

    let trimmed = trim_lines(&collapsed);

    let without_rules = EQUALS_RULES.replace_all(&trimmed, "");

    let with_alt = without_rules.replace("![](", &format!("![{}](", IMAGE_PLACEHOLDER));

    NEWLINE_RUNS.replace_all(&trim_lines(&with_alt), "\n\n").trim().to_string()
}

fn trim_lines(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}
