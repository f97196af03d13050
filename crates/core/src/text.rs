//! Plain-text helpers for CLI display
//!
//! Comment bodies come back from the API as HTML. These helpers reduce them
//! to terminal-friendly text for the formatted (non-JSON) output paths.

use regex::Regex;

/// Strip HTML tags and decode common entities.
pub fn strip_html(text: &str) -> String {
    let re = Regex::new(r"<[^>]*>").unwrap();
    let stripped = re.replace_all(text, "");
    stripped
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

/// Truncate to `max_len` characters, appending an ellipsis when trimmed.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_removes_tags() {
        let stripped = strip_html("<p>Nice <em>article</em>!</p>");
        assert_eq!(stripped, "Nice article!");
    }

    #[test]
    fn test_strip_html_decodes_entities() {
        let stripped = strip_html("a &lt; b &amp;&amp; b &gt; c");
        assert_eq!(stripped, "a < b && b > c");
    }

    #[test]
    fn test_strip_html_plain_text_passthrough() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }

    #[test]
    fn test_truncate_text_short_input_unchanged() {
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn test_truncate_text_trims_and_marks() {
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
    }
}
