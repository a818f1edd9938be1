use crate::parsers::text;
use regex::Regex;
use std::sync::LazyLock;

/// Metadata read from the raw HTML of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Contents of `<title>`, empty if absent
    pub title: String,
    /// `<meta name="description">` content, empty if absent
    pub description: String,
    /// `<meta property="og:image">` content
    pub og_image: Option<String>,
}

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static NOSCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<noscript[^>]*>.*?</noscript>").unwrap());
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:div|p|br|h[1-6]|li|tr|article|section|header|footer)[^>]*>").unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap());
static DESCRIPTION_NAME_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']+)["']"#).unwrap()
});
static DESCRIPTION_CONTENT_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*name=["']description["']"#).unwrap()
});
static OG_IMAGE_PROPERTY_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*property=["']og:image["'][^>]*content=["']([^"']+)["']"#).unwrap()
});
static OG_IMAGE_CONTENT_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*property=["']og:image["']"#).unwrap()
});

/// Reduces an HTML document to a single line approximating its visible text.
///
/// Each step is a global rewrite over the whole document:
/// 1. drop `script`, `style` and `noscript` elements with their content
/// 2. block-level tags become newlines
/// 3. every other tag becomes a space
/// 4. the entities in [`text::ENTITIES`] are decoded until none remain
/// 5. leftover `<` and `>` become spaces
/// 6. whitespace runs collapse to one space and the ends are trimmed
///
/// The result never contains `<` or `>` and `html_to_text(html_to_text(x))`
/// equals `html_to_text(x)`.
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = NOSCRIPT_RE.replace_all(&text, "");

    let text = BLOCK_TAG_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, " ");

    let text = text::decode_entities_fully(&text);
    let text = text.replace(['<', '>'], " ");

    text::normalize_whitespace(&text)
}

/// Extracts title, description and Open Graph image from raw HTML
pub fn extract_metadata(html: &str) -> PageMetadata {
    let title = first_capture(&[&*TITLE_RE], html).unwrap_or_default();
    let description = first_capture(
        &[&*DESCRIPTION_NAME_FIRST_RE, &*DESCRIPTION_CONTENT_FIRST_RE],
        html,
    )
    .unwrap_or_default();
    let og_image = first_capture(
        &[&*OG_IMAGE_PROPERTY_FIRST_RE, &*OG_IMAGE_CONTENT_FIRST_RE],
        html,
    );

    ::log::debug!(
        "Extracted metadata: title={:?}, description {} chars, og:image present: {}",
        title,
        description.chars().count(),
        og_image.is_some()
    );

    PageMetadata {
        title,
        description,
        og_image,
    }
}

/// Trimmed first capture group of the first pattern that matches
fn first_capture(patterns: &[&Regex], html: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(html))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
