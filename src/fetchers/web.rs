use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fetchers::http::HttpClient;
use crate::parsers::html;
use crate::results::PageContent;
use crate::utils::truncate_content;
use url::Url;

/// Fetches an arbitrary webpage and reduces it to bounded plain text.
///
/// The URL is validated before any network call. The returned content
/// carries the final URL after redirects.
pub async fn fetch_webpage(
    client: &dyn HttpClient,
    url: &str,
    config: &FetchConfig,
) -> Result<PageContent, FetchError> {
    let parsed = Url::parse(url).map_err(FetchError::InvalidUrl)?;

    ::log::info!("Fetching webpage: {}", parsed);

    let headers = [
        ("User-Agent", config.user_agent.as_str()),
        ("Accept", config.accept.as_str()),
        ("Accept-Language", config.accept_language.as_str()),
    ];

    let response = client.get(parsed.as_str(), &headers).await.map_err(|e| {
        ::log::error!("Fetch error for {}: {}", parsed, e);
        e
    })?;

    if !response.is_success() {
        ::log::warn!(
            "Upstream returned {} {} for {}",
            response.status,
            response.status_text,
            parsed
        );
        return Err(FetchError::Upstream {
            status: response.status,
            status_text: response.status_text,
        });
    }

    if response.final_url != parsed.as_str() {
        ::log::debug!("Redirected {} -> {}", parsed, response.final_url);
    }

    let metadata = html::extract_metadata(&response.body);
    let text = html::html_to_text(&response.body);
    let body = truncate_content(&text, config.max_content_length);

    ::log::info!(
        "Extracted {} characters from {}{}",
        body.original_length,
        response.final_url,
        if body.truncated { " (truncated)" } else { "" }
    );

    Ok(PageContent::webpage(
        response.final_url,
        metadata.title,
        metadata.description,
        metadata.og_image,
        body,
    ))
}
