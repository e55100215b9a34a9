//! Small text helpers for user input and HTML output.

use std::sync::OnceLock;

use regex::Regex;

// Literal pattern; compiling it cannot fail.
#[allow(clippy::unwrap_used)]
fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap())
}

/// Remove markup tags, keeping the text between them.
pub fn strip_tags(input: &str) -> String {
    tag_pattern().replace_all(input, "").into_owned()
}

/// Strip tags, collapse whitespace runs and trim.
pub fn sanitize_text_field(input: &str) -> String {
    strip_tags(input)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text for use in HTML element content or quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>10001</b>"), "10001");
        assert_eq!(strip_tags("us<script>alert(1)</script>"), "usalert(1)");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn test_sanitize_text_field() {
        assert_eq!(sanitize_text_field("  on\n"), "on");
        assert_eq!(sanitize_text_field("a   <i>b</i>\tc"), "a b c");
        assert_eq!(sanitize_text_field(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Fish & \"Chips\""), "Fish &amp; &quot;Chips&quot;");
        assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#039;x&#039;&gt;");
        assert_eq!(escape_html("Light Rain"), "Light Rain");
    }
}
