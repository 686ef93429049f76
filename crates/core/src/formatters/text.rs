use ego_tree::NodeRef;
use scraper::{Html, Node};

const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Convert an HTML fragment to plain text.
///
/// Block elements start and end lines, whitespace inside a line is
/// collapsed, and empty lines are dropped.
pub fn convert_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    collect_text(*document.root_element(), &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            let name = element.name();
            if INVISIBLE_ELEMENTS.contains(&name) {
                return;
            }
            if name == "br" {
                out.push('\n');
                return;
            }

            let is_block = BLOCK_ELEMENTS.contains(&name);
            if is_block {
                out.push('\n');
            }
            for child in node.children() {
                collect_text(child, out);
            }
            if is_block {
                out.push('\n');
            }
        }
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}
