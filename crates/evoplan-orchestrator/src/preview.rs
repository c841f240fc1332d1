//! Fenced HTML block extraction for live preview
//!
//! Best-effort heuristic over arbitrary generated text: find the first
//! fenced block tagged `html` (case-insensitive), return its inner content
//! trimmed. No attempt is made to validate the markup; rendering failures
//! are the presentation layer's concern.

use regex::Regex;
use std::sync::OnceLock;

static HTML_BLOCK: OnceLock<Regex> = OnceLock::new();

fn html_block_re() -> &'static Regex {
    // (?is): case-insensitive tag match, dot spans newlines; body capture is
    // non-greedy so only the first block is taken
    HTML_BLOCK.get_or_init(|| Regex::new(r"(?is)```html\s*(.+?)\s*```").expect("valid regex"))
}

/// Extract the first fenced `html` block from generated text
///
/// Returns `None` when no such block exists; never fails.
pub fn extract_html(text: &str) -> Option<String> {
    html_block_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_trimmed_inner_content() {
        let text = "Here you go:\n```html\n  <p>hi</p>  \n```\nEnjoy!";
        assert_eq!(extract_html(text).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let text = "```HTML\n<div>x</div>\n```";
        assert_eq!(extract_html(text).unwrap(), "<div>x</div>");
    }

    #[test]
    fn test_body_spans_multiple_lines() {
        let text = "```html\n<html>\n<body>\n<p>hi</p>\n</body>\n</html>\n```";
        let html = extract_html(text).unwrap();
        assert!(html.starts_with("<html>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_first_block_wins() {
        let text = "```html\n<p>first</p>\n```\ntext\n```html\n<p>second</p>\n```";
        assert_eq!(extract_html(text).unwrap(), "<p>first</p>");
    }

    #[test]
    fn test_no_block_returns_none() {
        assert_eq!(extract_html("no fences here"), None);
        assert_eq!(extract_html("```python\nprint('hi')\n```"), None);
        assert_eq!(extract_html(""), None);
    }

    #[test]
    fn test_unclosed_fence_returns_none() {
        assert_eq!(extract_html("```html\n<p>dangling</p>"), None);
    }
}
