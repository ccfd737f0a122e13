use scraper::{Html, Node};

// Subtrees whose text is never rendered.
const SKIP_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "head", "template"];

/// Extract the visible text of an HTML document, with all runs of whitespace
/// (inside and between elements) collapsed to single spaces.
///
/// Parsing is html5ever-based and lenient, so malformed markup still yields
/// whatever text it carries; an empty body yields an empty string.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| match a.value() {
            Node::Element(el) => SKIP_ELEMENTS.contains(&el.name()),
            _ => false,
        });
        if hidden {
            continue;
        }
        words.extend(text.text.split_whitespace());
    }
    words.join(" ")
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
