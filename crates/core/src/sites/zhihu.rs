//! Structured Markdown extractor for Zhihu answers and column articles.
//!
//! The page is walked once and Markdown is written to a fresh buffer; the
//! parsed document is never modified. Output layout:
//!
//! ```text
//! # <title>
//!
//! 作者：<author>
//!
//! <body>
//! ```
//!
//! Each part is optional. A page with no recognizable content region
//! yields just the title and author, or an empty string.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use percent_encoding::percent_decode_str;
use regex::Regex;
use scraper::{CaseSensitivity, ElementRef, Html, Node, Selector};
use url::Url;

use super::SiteExtractor;
use crate::formatters::markdown::IMAGE_PLACEHOLDER;

const REDIRECT_HOST: &str = "link.zhihu.com";
const REDIRECT_PARAM: &str = "target";
const AUTHOR_LABEL: &str = "作者：";
const MATH_CLASS: &str = "ztext-math";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid built-in selector")
}

static TITLE_META: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["meta[property=\"og:title\"]", "meta[name=\"title\"]", "meta[itemprop=\"headline\"]"]
        .into_iter()
        .map(selector)
        .collect()
});
static TITLE_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h1.QuestionHeader-title, h1.Post-Title"));
static AUTHOR_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector(".AuthorInfo .AuthorInfo-name .UserLink-link"));
static AUTHOR_META: LazyLock<Selector> = LazyLock::new(|| selector(".AuthorInfo meta[itemprop=\"name\"]"));
static AUTHOR_NAME: LazyLock<Selector> = LazyLock::new(|| selector(".AuthorInfo .AuthorInfo-name"));
static CONTENT_REGIONS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [".Post-RichText", ".RichContent-inner .RichText", ".RichText.ztext", ".RichText"]
        .into_iter()
        .map(selector)
        .collect()
});
static CODE: LazyLock<Selector> = LazyLock::new(|| selector("code"));

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline pattern"));
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid space pattern"));
static TRAILING_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("valid trailing space pattern"));

/// Zhihu (知乎) extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zhihu;

impl SiteExtractor for Zhihu {
    fn name(&self) -> &'static str {
        "zhihu"
    }

    fn domains(&self) -> &'static [&'static str] {
        &["zhihu.com"]
    }

    fn to_markdown(&self, html: &str, url: &str) -> String {
        to_markdown(html, url)
    }
}

/// Render a Zhihu page as Markdown.
pub fn to_markdown(html: &str, url: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    if let Some(title) = extract_title(&document) {
        out.push_str(&format!("# {}\n\n", title));
    }

    if let Some(author) = extract_author(&document) {
        out.push_str(&format!("{}{}\n\n", AUTHOR_LABEL, author));
    }

    match content_region(&document) {
        Some(region) => {
            let mut renderer = Renderer::new(Url::parse(url).ok());
            renderer.render_children(*region);
            out.push_str(&renderer.out);
        }
        None => tracing::debug!(url, "no zhihu content region found"),
    }

    finalize(&out)
}

fn extract_title(document: &Html) -> Option<String> {
    let from_meta = TITLE_META.iter().find_map(|sel| {
        document
            .select(sel)
            .filter_map(|meta| meta.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
    });

    from_meta
        .map(str::to_string)
        .or_else(|| document.select(&TITLE_HEADING).map(element_text).find(|t| !t.is_empty()))
}

fn extract_author(document: &Html) -> Option<String> {
    document
        .select(&AUTHOR_LINK)
        .map(element_text)
        .find(|name| !name.is_empty())
        .or_else(|| {
            document
                .select(&AUTHOR_META)
                .filter_map(|meta| meta.value().attr("content"))
                .map(|name| name.trim().to_string())
                .find(|name| !name.is_empty())
        })
        .or_else(|| document.select(&AUTHOR_NAME).map(element_text).find(|name| !name.is_empty()))
}

fn content_region(document: &Html) -> Option<ElementRef<'_>> {
    CONTENT_REGIONS.iter().find_map(|sel| document.select(sel).next())
}

/// TeX source of a formula element: its `data-tex`, or the text of a
/// `.ztext-math` element that lacks one.
fn math_source(el: ElementRef<'_>) -> Option<String> {
    if let Some(tex) = el.value().attr("data-tex") {
        return Some(tex.trim().to_string());
    }
    el.value().has_class(MATH_CLASS, CaseSensitivity::CaseSensitive).then(|| element_text(el))
}

/// Whitespace-collapsed text of an element.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn finalize(markdown: &str) -> String {
    let stripped = TRAILING_SPACES.replace_all(markdown, "\n");
    let collapsed = NEWLINE_RUNS.replace_all(&stripped, "\n\n");
    let spaced = SPACE_RUNS.replace_all(&collapsed, " ");

    let body = spaced.trim();
    if body.is_empty() { String::new() } else { format!("{}\n", body) }
}

/// Real destination of a `link.zhihu.com/?target=` redirect.
///
/// Returns `None` for ordinary links and for redirect links whose target
/// is not valid percent-encoded UTF-8 or not an absolute URL; callers keep
/// the original href in both cases.
pub fn resolve_redirect(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") { format!("https:{}", href) } else { href.to_string() };
    let parsed = Url::parse(&absolute).ok()?;

    if parsed.host_str()? != REDIRECT_HOST {
        return None;
    }

    let raw = parsed
        .query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == REDIRECT_PARAM)
        .map(|(_, value)| value)?;

    let target = percent_decode_str(raw).decode_utf8().ok()?;
    Url::parse(&target).ok()?;
    Some(target.into_owned())
}

/// Language tag from a `language-*` class on the block or its `code`.
fn code_language(pre: ElementRef<'_>) -> String {
    std::iter::once(pre)
        .chain(pre.select(&CODE))
        .flat_map(|el| el.value().classes())
        .find_map(|class| class.strip_prefix("language-"))
        .unwrap_or_default()
        .to_string()
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Rows that belong to this table, not to tables nested in its cells.
fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    child_elements(table)
        .flat_map(|child| match child.value().name() {
            "thead" | "tbody" | "tfoot" => child_elements(child).collect(),
            _ => vec![child],
        })
        .filter(|el| el.value().name() == "tr")
        .collect()
}

fn row_cells<'a>(row: ElementRef<'a>, tag: &'static str) -> Vec<String> {
    child_elements(row).filter(|cell| cell.value().name() == tag).map(element_text).collect()
}

fn image_source(img: ElementRef<'_>) -> Option<&str> {
    ["data-original", "data-actualsrc", "src"]
        .into_iter()
        .filter_map(|attr| img.value().attr(attr))
        .map(str::trim)
        .find(|src| !src.is_empty() && !src.starts_with("data:"))
}

fn needs_caption(img: ElementRef<'_>) -> bool {
    img.value().attr("alt").map(str::trim).is_none_or(|alt| alt.is_empty() || alt == IMAGE_PLACEHOLDER)
}

fn next_figcaption(img: ElementRef<'_>) -> Option<ElementRef<'_>> {
    img.next_siblings().filter_map(ElementRef::wrap).find(|el| el.value().name() == "figcaption")
}

/// True when a preceding image sibling already used this caption as its
/// alt text.
fn caption_consumed(figcaption: ElementRef<'_>) -> bool {
    figcaption
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "img")
        .is_some_and(|img| needs_caption(img) && image_source(img).is_some())
}

struct Renderer {
    out: String,
    base_url: Option<Url>,
}

impl Renderer {
    fn new(base_url: Option<Url>) -> Self {
        Self { out: String::new(), base_url }
    }

    /// Renders children into a separate buffer.
    fn render_nested<'a>(&self, nodes: impl Iterator<Item = NodeRef<'a, Node>>) -> String {
        let mut nested = Renderer::new(self.base_url.clone());
        for node in nodes {
            nested.render_node(node);
        }
        nested.out
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    fn ensure_line_start(&mut self) {
        if !self.at_line_start() {
            self.out.push('\n');
        }
    }

    fn push_text(&mut self, text: &str) {
        let mut collapsed = String::with_capacity(text.len());
        let mut last_was_space = false;
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    collapsed.push(' ');
                }
                last_was_space = true;
            } else {
                collapsed.push(ch);
                last_was_space = false;
            }
        }

        let collapsed = if self.at_line_start() { collapsed.trim_start() } else { collapsed.as_str() };
        self.out.push_str(collapsed);
    }

    fn render_children(&mut self, node: NodeRef<'_, Node>) {
        for child in node.children() {
            self.render_node(child);
        }
    }

    fn render_node(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.push_text(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.render_element(element);
                }
            }
            _ => {}
        }
    }

    fn render_element(&mut self, el: ElementRef<'_>) {
        if let Some(tex) = math_source(el) {
            self.out.push_str(&format!("$${}$$", tex));
            return;
        }

        match el.value().name() {
            "script" | "style" | "noscript" | "template" => {}
            "pre" => self.render_code_block(el),
            "code" => self.render_inline_code(el),
            "table" => self.render_table(el),
            "img" => self.render_image(el),
            "figcaption" if caption_consumed(el) => {}
            "a" => self.render_link(el),
            "blockquote" => self.render_blockquote(el),
            "ul" => self.render_list(el, false),
            "ol" => self.render_list(el, true),
            "br" => self.out.push('\n'),
            "hr" => {
                self.ensure_line_start();
                self.out.push_str("\n---\n\n");
            }
            name @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                let text = element_text(el);
                if !text.is_empty() {
                    self.ensure_line_start();
                    self.out.push_str(&format!("\n{} {}\n\n", "#".repeat(level), text));
                }
            }
            "p" => {
                self.ensure_line_start();
                self.render_children(*el);
                self.out.push_str("\n\n");
            }
            "div" | "section" | "figure" | "figcaption" | "article" => {
                self.ensure_line_start();
                self.render_children(*el);
                self.ensure_line_start();
            }
            _ => self.render_children(*el),
        }
    }

    fn render_code_block(&mut self, pre: ElementRef<'_>) {
        let language = code_language(pre);
        let code = pre.text().collect::<String>();

        self.ensure_line_start();
        self.out.push_str(&format!("```{}\n{}\n```\n\n", language, code.trim_end_matches('\n')));
    }

    fn render_inline_code(&mut self, code: ElementRef<'_>) {
        // Adjacent spans would otherwise merge into one.
        if self.out.ends_with('`') {
            self.out.push(' ');
        }
        self.out.push_str(&format!("`{}`", code.text().collect::<String>()));
    }

    fn render_table(&mut self, table: ElementRef<'_>) {
        let rows = table_rows(table);
        let headers: Vec<String> = rows.iter().flat_map(|row| row_cells(*row, "th")).collect();

        self.ensure_line_start();
        if !headers.is_empty() {
            self.out.push_str(&format!("|{}|\n", headers.join("|")));
            self.out.push_str(&format!("|{}|\n", vec!["---"; headers.len()].join("|")));
        }

        for row in rows {
            let cells = row_cells(row, "td");
            if !cells.is_empty() {
                self.out.push_str(&format!("|{}|\n", cells.join("|")));
            }
        }
        self.out.push('\n');
    }

    fn render_image(&mut self, img: ElementRef<'_>) {
        let Some(src) = image_source(img) else {
            return;
        };

        let alt = if needs_caption(img) {
            next_figcaption(img).map(element_text).filter(|caption| !caption.is_empty())
        } else {
            img.value().attr("alt").map(|alt| alt.trim().to_string())
        };

        let src = self.absolutize(src);
        self.out.push_str(&format!("![{}]({})", alt.as_deref().unwrap_or(IMAGE_PLACEHOLDER), src));
    }

    fn render_link(&mut self, a: ElementRef<'_>) {
        let Some(href) = a.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            self.render_children(*a);
            return;
        };

        let has_image = a.descendants().filter_map(ElementRef::wrap).any(|el| el.value().name() == "img");
        if has_image {
            self.render_children(*a);
            return;
        }

        let target = match resolve_redirect(href) {
            Some(target) => target,
            None => self.absolutize(href),
        };
        let text = element_text(a);
        let text = if text.is_empty() { target.clone() } else { text };

        self.out.push_str(&format!("[{}]({})", text, target));
    }

    fn render_blockquote(&mut self, quote: ElementRef<'_>) {
        let inner = self.render_nested(quote.children());

        self.ensure_line_start();
        for line in inner.lines().map(str::trim).filter(|line| !line.is_empty()) {
            self.out.push_str(&format!("> {}\n", line));
        }
        self.out.push('\n');
    }

    fn render_list(&mut self, list: ElementRef<'_>, ordered: bool) {
        self.ensure_line_start();
        self.render_list_items(list, ordered);
        self.out.push('\n');
    }

    /// Nested lists are written after their parent item at the same level.
    fn render_list_items(&mut self, list: ElementRef<'_>, ordered: bool) {
        let items = list.children().filter_map(ElementRef::wrap).filter(|el| el.value().name() == "li");

        for (index, item) in items.enumerate() {
            let (nested, content): (Vec<_>, Vec<_>) = item.children().partition(|child| {
                ElementRef::wrap(*child).is_some_and(|el| matches!(el.value().name(), "ul" | "ol"))
            });

            let text = self.render_nested(content.into_iter());
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                let marker = if ordered { format!("{}. ", index + 1) } else { "- ".to_string() };
                self.out.push_str(&format!("{}{}\n", marker, text));
            }

            for sublist in nested.into_iter().filter_map(ElementRef::wrap) {
                self.render_list_items(sublist, sublist.value().name() == "ol");
            }
        }
    }

    fn absolutize(&self, link: &str) -> String {
        if Url::parse(link).is_ok() {
            return link.to_string();
        }
        self.base_url
            .as_ref()
            .and_then(|base| base.join(link).ok())
            .map(|joined| joined.to_string())
            .unwrap_or_else(|| link.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.zhihu.com/question/1/answer/2";

    fn page(body: &str) -> String {
        format!(
            "<html><head></head><body><div class=\"RichContent-inner\"><div class=\"RichText ztext\">{}</div></div></body></html>",
            body
        )
    }

    #[test]
    fn test_table_with_header() {
        let html = page("<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>");
        assert_eq!(to_markdown(&html, URL), "|A|B|\n|---|---|\n|1|2|\n");
    }

    #[test]
    fn test_table_without_header() {
        let html = page("<table><tr><td>1</td><td>2</td></tr><tr><td>3</td><td>4</td></tr></table>");
        assert_eq!(to_markdown(&html, URL), "|1|2|\n|3|4|\n");
    }

    #[test]
    fn test_table_shape() {
        let rows = 4;
        let columns = 3;
        let mut body = String::from("<table><thead><tr>");
        for c in 0..columns {
            body.push_str(&format!("<th>h{c}</th>"));
        }
        body.push_str("</tr></thead><tbody>");
        for r in 0..rows - 1 {
            body.push_str("<tr>");
            for c in 0..columns {
                body.push_str(&format!("<td>{r}-{c}</td>"));
            }
            body.push_str("</tr>");
        }
        body.push_str("</tbody></table>");

        let markdown = to_markdown(&page(&body), URL);
        let lines: Vec<&str> = markdown.lines().collect();
        assert_eq!(lines.len(), rows + 1);
        for line in lines {
            assert_eq!(line.matches('|').count(), columns + 1, "{line}");
        }
    }

    #[test]
    fn test_nested_table_rendered_once() {
        let html = page("<table><tr><th>a<table><tr><td>x</td></tr></table></th><th>b</th></tr></table>");
        assert_eq!(to_markdown(&html, URL), "|ax|b|\n|---|---|\n");

        let html = page("<table><tbody><tr><td>outer<table><tr><td>inner</td></tr></table></td></tr></tbody></table>");
        assert_eq!(to_markdown(&html, URL), "|outerinner|\n");
    }

    #[test]
    fn test_empty_alt_image() {
        let html = page(r#"<img src="https://x/y.png">"#);
        assert_eq!(to_markdown(&html, URL), "![图片](https://x/y.png)\n");
    }

    #[test]
    fn test_image_caption_recovered_once() {
        let html = page(
            r#"<figure><noscript><img src="https://pic.zhimg.com/a.jpg"></noscript><img src="data:image/svg+xml;utf8,x" data-actualsrc="https://pic.zhimg.com/a.jpg" alt="图片"><figcaption>A cat</figcaption></figure>"#,
        );
        let markdown = to_markdown(&html, URL);
        assert_eq!(markdown, "![A cat](https://pic.zhimg.com/a.jpg)\n");
    }

    #[test]
    fn test_image_alt_kept_and_caption_rendered() {
        let html = page(r#"<figure><img src="https://x/a.png" alt="diagram"><figcaption>Figure 1</figcaption></figure>"#);
        let markdown = to_markdown(&html, URL);
        assert!(markdown.contains("![diagram](https://x/a.png)"));
        assert!(markdown.contains("Figure 1"));
    }

    #[test]
    fn test_math_formula() {
        let html = page(r#"<p>Energy: <span class="ztext-math" data-eeimg="1" data-tex="E=mc^2">E=mc^2</span></p>"#);
        assert_eq!(to_markdown(&html, URL), "Energy: $$E=mc^2$$\n");
    }

    #[test]
    fn test_math_class_without_tex_attribute() {
        let html = page(r#"<p>Sum: <span class="ztext-math">a + b</span></p>"#);
        assert_eq!(to_markdown(&html, URL), "Sum: $$a + b$$\n");
    }

    #[test]
    fn test_code_block_with_language() {
        let html = page(
            r#"<div class="highlight"><pre><code class="language-python">def f():
    return 1
</code></pre></div>"#,
        );
        let markdown = to_markdown(&html, URL);
        assert!(markdown.starts_with("```python\ndef f():\n"));
        assert!(markdown.trim_end().ends_with("```"));
    }

    #[test]
    fn test_code_block_without_language() {
        let html = page("<pre>plain</pre>");
        assert_eq!(to_markdown(&html, URL), "```\nplain\n```\n");
    }

    #[test]
    fn test_inline_code() {
        let html = page("<p>Call <code>main()</code> first.</p>");
        assert_eq!(to_markdown(&html, URL), "Call `main()` first.\n");
    }

    #[test]
    fn test_adjacent_inline_code_stays_separate() {
        let html = page("<p><code>a</code><code>b</code></p>");
        assert_eq!(to_markdown(&html, URL), "`a` `b`\n");
    }

    #[test]
    fn test_code_inside_pre_is_not_backticked() {
        let html = page("<pre><code>let x = 1;</code></pre>");
        let markdown = to_markdown(&html, URL);
        assert!(!markdown.contains("`let"));
        assert!(markdown.contains("let x = 1;"));
    }

    #[test]
    fn test_redirect_link_decoded() {
        let html = page(
            r#"<p><a href="https://link.zhihu.com/?target=https%3A//github.com/rust-lang/rust" class="external">rust</a></p>"#,
        );
        assert_eq!(to_markdown(&html, URL), "[rust](https://github.com/rust-lang/rust)\n");
    }

    #[test]
    fn test_plain_link_kept() {
        let html = page(r#"<p><a href="https://example.com/page">example</a></p>"#);
        assert_eq!(to_markdown(&html, URL), "[example](https://example.com/page)\n");
    }

    #[test]
    fn test_relative_link_resolved() {
        let html = page(r#"<p><a href="/people/someone">someone</a></p>"#);
        assert_eq!(to_markdown(&html, URL), "[someone](https://www.zhihu.com/people/someone)\n");
    }

    #[test]
    fn test_resolve_redirect() {
        assert_eq!(
            resolve_redirect("https://link.zhihu.com/?target=http%3A//example.com/a%3Fb%3Dc"),
            Some("http://example.com/a?b=c".to_string())
        );
        assert_eq!(
            resolve_redirect("//link.zhihu.com/?target=https%3A//example.com"),
            Some("https://example.com".to_string())
        );
        assert_eq!(resolve_redirect("https://link.zhihu.com/?other=1"), None);
        assert_eq!(resolve_redirect("https://example.com/?target=x"), None);
        assert_eq!(resolve_redirect("not a url"), None);
        assert_eq!(resolve_redirect("https://link.zhihu.com/?target="), None);
    }

    #[test]
    fn test_resolve_redirect_rejects_undecodable_target() {
        assert_eq!(resolve_redirect("https://link.zhihu.com/?target=%E0%A4%A"), None);
        assert_eq!(resolve_redirect("https://link.zhihu.com/?target=%FF%FE"), None);
        assert_eq!(resolve_redirect("https://link.zhihu.com/?target=not%20a%20url"), None);
    }

    #[test]
    fn test_malformed_redirect_keeps_original_href() {
        let html = page(r#"<p><a href="https://link.zhihu.com/?target=%E0%A4%A">bad</a></p>"#);
        assert_eq!(to_markdown(&html, URL), "[bad](https://link.zhihu.com/?target=%E0%A4%A)\n");
    }

    #[test]
    fn test_blockquote() {
        let html = page("<blockquote>first line<br>second line</blockquote>");
        assert_eq!(to_markdown(&html, URL), "> first line\n> second line\n");
    }

    #[test]
    fn test_unordered_list() {
        let html = page("<ul><li>one</li><li>two</li></ul>");
        assert_eq!(to_markdown(&html, URL), "- one\n- two\n");
    }

    #[test]
    fn test_ordered_list_with_nested_flattened() {
        let html = page("<ol><li>first<ul><li>inner</li></ul></li><li>second</li></ol>");
        assert_eq!(to_markdown(&html, URL), "1. first\n- inner\n2. second\n");
    }

    #[test]
    fn test_title_and_author() {
        let html = r#"<html><head><meta property="og:title" content="Why Rust?"></head><body>
            <div class="AuthorInfo"><meta itemprop="name" content="Ferris">
              <div class="AuthorInfo-head"><span class="AuthorInfo-name"><a class="UserLink-link" href="/people/ferris">Ferris</a></span></div>
            </div>
            <div class="RichText ztext"><p>Because.</p></div></body></html>"#;
        assert_eq!(to_markdown(html, URL), "# Why Rust?\n\n作者：Ferris\n\nBecause.\n");
    }

    #[test]
    fn test_title_heading_fallback() {
        let html = r#"<html><body><h1 class="QuestionHeader-title">A question</h1></body></html>"#;
        assert_eq!(to_markdown(html, URL), "# A question\n");
    }

    #[test]
    fn test_author_meta_fallback() {
        let html = r#"<html><body><div class="AuthorInfo"><meta itemprop="name" content="Ferris"></div></body></html>"#;
        assert_eq!(to_markdown(html, URL), "作者：Ferris\n");
    }

    #[test]
    fn test_missing_everything_is_empty() {
        assert_eq!(to_markdown("<html><body><p>nothing here</p></body></html>", URL), "");
        assert_eq!(to_markdown("", URL), "");
    }

    #[test]
    fn test_whitespace_cleanup() {
        let html = page("<p>a    b</p>\n\n\n<p>   c</p><br><br><br><br><p>d</p>");
        assert_eq!(to_markdown(&html, URL), "a b\n\nc\n\nd\n");
    }

    #[test]
    fn test_post_rich_text_preferred() {
        let html = r#"<html><body><div class="RichText">comment</div><div class="Post-RichText"><p>article body</p></div></body></html>"#;
        assert_eq!(to_markdown(html, URL), "article body\n");
    }

    #[test]
    fn test_extractor_trait() {
        let html = page("<p>hello</p>");
        assert_eq!(Zhihu.to_markdown(&html, URL), to_markdown(&html, URL));
        assert!(Zhihu.matches("https://zhuanlan.zhihu.com/p/1"));
    }
}
