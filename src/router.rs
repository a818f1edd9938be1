use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fetchers::{self, HttpClient};
use crate::results::PageContent;
use regex::Regex;
use std::sync::LazyLock;

/// Host/path shapes that are routed to the YouTube extractor
static YOUTUBE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)youtube\.com/watch",
        r"(?i)youtu\.be/",
        r"(?i)youtube\.com/embed",
        r"(?i)youtube\.com/v/",
        r"(?i)youtube\.com/shorts/",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Loose "looks like a domain with an optional path" check for pasted text
static URL_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?([\w-]+\.)+[\w-]+(/[\w\-./?%&=]*)?$").unwrap()
});

/// Which extractor handles a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Webpage,
    YouTube,
}

impl SourceKind {
    /// Classify a URL by matching it against the known YouTube shapes
    pub fn classify(url: &str) -> Self {
        if YOUTUBE_PATTERNS.iter().any(|re| re.is_match(url)) {
            ::log::debug!("Classifying as YouTube: {}", url);
            SourceKind::YouTube
        } else {
            ::log::debug!("Classifying as webpage: {}", url);
            SourceKind::Webpage
        }
    }
}

/// Trim the input and prepend `https://` when no http(s) scheme is present
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Whether pasted text should be treated as a URL rather than plain text
pub fn looks_like_url(input: &str) -> bool {
    URL_LIKE_RE.is_match(input.trim())
}

/// Normalize user input and dispatch it to the matching extractor
pub async fn fetch_source(
    client: &dyn HttpClient,
    input: &str,
    config: &FetchConfig,
) -> Result<PageContent, FetchError> {
    if input.trim().is_empty() {
        return Err(FetchError::MissingUrl);
    }

    let url = normalize_url(input);

    match SourceKind::classify(&url) {
        SourceKind::YouTube => fetchers::fetch_youtube(client, &url, config).await,
        SourceKind::Webpage => fetchers::fetch_webpage(client, &url, config).await,
    }
}
