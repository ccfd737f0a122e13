use std::sync::LazyLock;

use regex::Regex;

// Scheme plus a non-whitespace run. Deliberately loose: trailing punctuation
// stays attached, exactly like the heuristic the output consumers expect.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Extract every http(s) URL from `text` in first-seen left-to-right order.
/// Duplicates are retained; order determines fetch and output order.
pub fn extract_links(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
