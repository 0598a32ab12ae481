//! Output-safe text for untrusted remote fields.

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drops control characters (ESC included) so remote text cannot drive the
/// terminal. Newlines and tabs survive.
pub fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Only plain web links are rendered; `javascript:` and friends are dropped.
pub fn is_safe_link(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("R&D 'lead'"), "R&amp;D &#39;lead&#39;");
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_sanitize_terminal_strips_escape_sequences() {
        assert_eq!(sanitize_terminal("\x1b[31mred\x1b[0m"), "[31mred[0m");
        assert_eq!(sanitize_terminal("a\nb\tc\rd\x07"), "a\nb\tcd");
    }

    #[test]
    fn test_is_safe_link() {
        assert!(is_safe_link("https://example.com/apply"));
        assert!(is_safe_link("HTTP://example.com"));
        assert!(!is_safe_link("javascript:alert(1)"));
        assert!(!is_safe_link("data:text/html,hi"));
        assert!(!is_safe_link(""));
    }
}
