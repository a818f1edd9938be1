/// Marker appended to truncated content
pub const ELLIPSIS: &str = "...";

/// Content cut down to a maximum length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    /// Content, with [`ELLIPSIS`] appended when it was cut
    pub content: String,
    /// Length in characters before truncation
    pub original_length: usize,
    pub truncated: bool,
}

/// Truncate text to `max_length` characters, appending an ellipsis if cut
pub fn truncate_content(text: &str, max_length: usize) -> Truncated {
    let original_length = text.chars().count();

    if original_length <= max_length {
        return Truncated {
            content: text.to_string(),
            original_length,
            truncated: false,
        };
    }

    let mut content: String = text.chars().take(max_length).collect();
    content.push_str(ELLIPSIS);

    Truncated {
        content,
        original_length,
        truncated: true,
    }
}

/// Convert a page title or URL to a sanitized filename
pub fn sanitize_filename(name: &str) -> String {
    // Remove protocol and replace invalid filename characters
    let mut name = name.replace("http://", "").replace("https://", "");
    name = name.replace(['/', '\\', ':', '?', '&', '=', '#', '%', '*', '"', '<', '>', '|'], "_");
    let name = name.trim();

    // Limit filename length, on a character boundary
    if name.chars().count() > 100 {
        name.chars().take(100).collect()
    } else if name.is_empty() {
        "infographic".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_untouched() {
        let result = truncate_content("hello", 10);
        assert_eq!(result.content, "hello");
        assert_eq!(result.original_length, 5);
        assert!(!result.truncated);
    }

    #[test]
    fn test_exact_length_not_truncated() {
        let result = truncate_content("abcde", 5);
        assert_eq!(result.content, "abcde");
        assert!(!result.truncated);
    }

    #[test]
    fn test_long_content_truncated() {
        let result = truncate_content("abcdefgh", 5);
        assert_eq!(result.content, "abcde...");
        assert_eq!(result.original_length, 8);
        assert!(result.truncated);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let result = truncate_content("안녕하세요 세계", 5);
        assert_eq!(result.content, "안녕하세요...");
        assert_eq!(result.original_length, 8);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("https://example.com/a?b=c"), "example.com_a_b_c");
        assert_eq!(sanitize_filename("   "), "infographic");
        assert_eq!(sanitize_filename(&"x".repeat(150)).len(), 100);
    }
}
