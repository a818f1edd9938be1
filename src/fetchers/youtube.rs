// YouTube fetcher - oEmbed metadata plus a best-effort transcript

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fetchers::http::HttpClient;
use crate::parsers::{captions, youtube};
use crate::results::{PageContent, TranscriptSource, VideoDetails};
use crate::utils::truncate_content;
use serde::Deserialize;
use url::Url;

/// Body used when neither captions nor a description could be found
pub const NO_TRANSCRIPT_PLACEHOLDER: &str =
    "(No transcript available - infographic will be based on video title and channel information)";

/// Title and channel from the oEmbed endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub title: String,
    pub author: String,
}

/// Transcript text and the path that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub source: TranscriptSource,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
}

/// Fetches a YouTube video's metadata and text content.
///
/// An unrecognized URL is a validation error and unavailable metadata is
/// `VideoNotFound`. A missing transcript is not an error; the content then
/// carries a placeholder and `hasTranscript` is false.
pub async fn fetch_youtube(
    client: &dyn HttpClient,
    url: &str,
    config: &FetchConfig,
) -> Result<PageContent, FetchError> {
    let video_id = youtube::extract_video_id(url).ok_or(FetchError::InvalidYouTubeUrl)?;

    ::log::info!("Fetching YouTube video {} from {}", video_id, url);

    let info = fetch_video_info(client, &video_id, config)
        .await
        .ok_or(FetchError::VideoNotFound)?;

    let transcript = fetch_transcript(client, &video_id, config).await;
    match &transcript {
        Some(t) => ::log::info!(
            "Transcript for {} from {:?} ({} characters)",
            video_id,
            t.source,
            t.text.chars().count()
        ),
        None => ::log::info!("No transcript available for {}", video_id),
    }

    let content = assemble_content(&info, transcript.as_ref());
    let body = truncate_content(&content, config.max_content_length);

    Ok(PageContent::youtube(
        watch_url(config, &video_id),
        info.title,
        VideoDetails {
            thumbnail: thumbnail_url(config, &video_id),
            video_id,
            author: info.author,
            transcript_source: transcript.map(|t| t.source),
        },
        body,
    ))
}

/// Canonical watch page URL for a video
pub fn watch_url(config: &FetchConfig, video_id: &str) -> String {
    format!("{}/watch?v={}", config.youtube_base_url, video_id)
}

/// Highest-resolution conventional thumbnail; derived, never fetched
pub fn thumbnail_url(config: &FetchConfig, video_id: &str) -> String {
    format!(
        "{}/vi/{}/maxresdefault.jpg",
        config.thumbnail_base_url, video_id
    )
}

/// oEmbed endpoint for a video
pub fn oembed_url(config: &FetchConfig, video_id: &str) -> Result<Url, url::ParseError> {
    let watch = watch_url(config, video_id);
    Url::parse_with_params(
        &format!("{}/oembed", config.youtube_base_url),
        &[("url", watch.as_str()), ("format", "json")],
    )
}

/// Title and channel via oEmbed; `None` if the video cannot be resolved
pub async fn fetch_video_info(
    client: &dyn HttpClient,
    video_id: &str,
    config: &FetchConfig,
) -> Option<VideoInfo> {
    let endpoint = oembed_url(config, video_id).ok()?;

    let response = match client.get(endpoint.as_str(), &[]).await {
        Ok(response) => response,
        Err(e) => {
            ::log::warn!("oEmbed request for {} failed: {}", video_id, e);
            return None;
        }
    };

    if !response.is_success() {
        ::log::warn!("oEmbed returned {} for {}", response.status, video_id);
        return None;
    }

    match serde_json::from_str::<OEmbedResponse>(&response.body) {
        Ok(data) => Some(VideoInfo {
            title: data.title.unwrap_or_default(),
            author: data.author_name.unwrap_or_default(),
        }),
        Err(e) => {
            ::log::warn!("Failed to parse oEmbed response for {}: {}", video_id, e);
            None
        }
    }
}

/// Best-effort transcript: captions, then the player description, then the
/// description scraped from the page markup
pub async fn fetch_transcript(
    client: &dyn HttpClient,
    video_id: &str,
    config: &FetchConfig,
) -> Option<Transcript> {
    let url = watch_url(config, video_id);
    let headers = [
        ("User-Agent", config.user_agent.as_str()),
        ("Accept-Language", config.accept_language.as_str()),
    ];

    let html = match client.get(&url, &headers).await {
        Ok(response) if response.is_success() => response.body,
        Ok(response) => {
            ::log::warn!("Watch page returned {} for {}", response.status, video_id);
            return None;
        }
        Err(e) => {
            ::log::warn!("Transcript fetch error for {}: {}", video_id, e);
            return None;
        }
    };

    let Some(player) = youtube::parse_player_response(&html) else {
        ::log::debug!("No usable player response for {}, trying page description", video_id);
        return youtube::extract_page_description(&html).map(|text| Transcript {
            text,
            source: TranscriptSource::PageDescription,
        });
    };

    if let Some(track) = youtube::select_caption_track(player.caption_tracks()) {
        ::log::debug!("Using '{}' caption track for {}", track.language_code, video_id);
        if let Some(text) = fetch_caption_text(client, track).await {
            return Some(Transcript {
                text,
                source: TranscriptSource::Captions,
            });
        }
    }

    player.short_description().map(|text| Transcript {
        text: text.to_string(),
        source: TranscriptSource::Description,
    })
}

async fn fetch_caption_text(client: &dyn HttpClient, track: &youtube::CaptionTrack) -> Option<String> {
    let base_url = track.base_url.as_deref()?;

    match client.get(base_url, &[]).await {
        Ok(response) if response.is_success() => captions::extract_caption_text(&response.body),
        Ok(response) => {
            ::log::warn!("Caption track returned {}", response.status);
            None
        }
        Err(e) => {
            ::log::warn!("Caption track fetch failed: {}", e);
            None
        }
    }
}

/// Builds the fixed text template sent on as the video's content
pub fn assemble_content(info: &VideoInfo, transcript: Option<&Transcript>) -> String {
    let mut content = format!("YouTube Video: {}\nChannel: {}\n\n", info.title, info.author);

    match transcript {
        Some(t) => {
            content.push_str("Content/Transcript:\n");
            content.push_str(&t.text);
        }
        None => content.push_str(NO_TRANSCRIPT_PLACEHOLDER),
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::tests::StubClient;
    use crate::results::PageKind;

    const VIDEO_ID: &str = "abc123";
    const OEMBED_BODY: &str = r#"{"title":"Rust in 100 Seconds","author_name":"Fireship","type":"video"}"#;

    fn config() -> FetchConfig {
        FetchConfig::default()
    }

    fn oembed() -> String {
        oembed_url(&config(), VIDEO_ID).unwrap().to_string()
    }

    fn watch() -> String {
        watch_url(&config(), VIDEO_ID)
    }

    fn watch_page(player_response: &str) -> String {
        format!(
            "<html><script>var ytInitialPlayerResponse = {};var meta = 1;</script></html>",
            player_response
        )
    }

    #[test]
    fn test_oembed_url_encodes_watch_url() {
        assert_eq!(
            oembed(),
            "https://www.youtube.com/oembed?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc123&format=json"
        );
    }

    #[test]
    fn test_thumbnail_is_derived() {
        assert_eq!(
            thumbnail_url(&config(), VIDEO_ID),
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_assemble_content() {
        let info = VideoInfo {
            title: "T".to_string(),
            author: "A".to_string(),
        };
        assert_eq!(
            assemble_content(&info, None),
            format!("YouTube Video: T\nChannel: A\n\n{}", NO_TRANSCRIPT_PLACEHOLDER)
        );

        let transcript = Transcript {
            text: "hello".to_string(),
            source: TranscriptSource::Captions,
        };
        assert_eq!(
            assemble_content(&info, Some(&transcript)),
            "YouTube Video: T\nChannel: A\n\nContent/Transcript:\nhello"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_requests() {
        let client = StubClient::new();
        let err = fetch_youtube(&client, "https://example.com/watch", &config())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidYouTubeUrl));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_oembed_failure_is_not_found() {
        let client = StubClient::new().with(&oembed(), 404, "Not Found");
        let err = fetch_youtube(&client, "https://youtu.be/abc123", &config())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::VideoNotFound));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_oembed_bad_json_is_not_found() {
        let client = StubClient::new().with(&oembed(), 200, "<html>not json</html>");
        let err = fetch_youtube(&client, "https://youtu.be/abc123", &config())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::VideoNotFound));
    }

    #[tokio::test]
    async fn test_prefers_korean_captions() {
        let player = r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[
            {"baseUrl":"https://captions.test/en","languageCode":"en"},
            {"baseUrl":"https://captions.test/ko","languageCode":"ko"}]}},
            "videoDetails":{"shortDescription":"desc"}}"#;
        let client = StubClient::new()
            .with(&oembed(), 200, OEMBED_BODY)
            .with(&watch(), 200, &watch_page(player))
            .with(
                "https://captions.test/ko",
                200,
                r#"<transcript><text start="0">안녕하세요</text><text start="1">여러분</text></transcript>"#,
            );

        let page = fetch_youtube(&client, "https://youtube.com/shorts/abc123", &config())
            .await
            .unwrap();

        assert_eq!(page.kind, PageKind::Youtube);
        assert_eq!(page.video_id.as_deref(), Some("abc123"));
        assert_eq!(page.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(page.title, "Rust in 100 Seconds");
        assert_eq!(page.author.as_deref(), Some("Fireship"));
        assert_eq!(page.has_transcript, Some(true));
        assert_eq!(page.transcript_source, Some(TranscriptSource::Captions));
        assert_eq!(
            page.content,
            "YouTube Video: Rust in 100 Seconds\nChannel: Fireship\n\nContent/Transcript:\n안녕하세요 여러분"
        );
        assert!(!client.requested_urls().contains(&"https://captions.test/en".to_string()));
    }

    #[tokio::test]
    async fn test_empty_captions_fall_back_to_description() {
        let player = r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[
            {"baseUrl":"https://captions.test/en","languageCode":"en"}]}},
            "videoDetails":{"shortDescription":"Line one\nLine two"}}"#;
        let client = StubClient::new()
            .with(&oembed(), 200, OEMBED_BODY)
            .with(&watch(), 200, &watch_page(player))
            .with("https://captions.test/en", 200, "<transcript></transcript>");

        let page = fetch_youtube(&client, "https://www.youtube.com/watch?v=abc123", &config())
            .await
            .unwrap();

        assert_eq!(page.transcript_source, Some(TranscriptSource::Description));
        assert!(page.content.ends_with("Content/Transcript:\nLine one\nLine two"));
    }

    #[tokio::test]
    async fn test_no_tracks_uses_description() {
        let player = r#"{"videoDetails":{"shortDescription":"Just a description"}}"#;
        let client = StubClient::new()
            .with(&oembed(), 200, OEMBED_BODY)
            .with(&watch(), 200, &watch_page(player));

        let page = fetch_youtube(&client, "https://www.youtube.com/embed/abc123", &config())
            .await
            .unwrap();

        assert_eq!(page.has_transcript, Some(true));
        assert_eq!(page.transcript_source, Some(TranscriptSource::Description));
    }

    #[tokio::test]
    async fn test_null_caption_tracks_fall_back_to_description() {
        let player = r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":null}},
            "videoDetails":{"shortDescription":"Real description"}}"#;
        let client = StubClient::new()
            .with(&oembed(), 200, OEMBED_BODY)
            .with(&watch(), 200, &watch_page(player));

        let page = fetch_youtube(&client, "https://youtu.be/abc123", &config())
            .await
            .unwrap();

        assert_eq!(page.has_transcript, Some(true));
        assert_eq!(page.transcript_source, Some(TranscriptSource::Description));
        assert!(page.content.ends_with("Content/Transcript:\nReal description"));
    }

    #[tokio::test]
    async fn test_missing_player_response_uses_page_description() {
        let html = r#"<html>"description":{"simpleText":"From the page\nmarkup"}</html>"#;
        let client = StubClient::new()
            .with(&oembed(), 200, OEMBED_BODY)
            .with(&watch(), 200, html);

        let page = fetch_youtube(&client, "https://www.youtube.com/v/abc123", &config())
            .await
            .unwrap();

        assert_eq!(page.transcript_source, Some(TranscriptSource::PageDescription));
        assert!(page.content.ends_with("Content/Transcript:\nFrom the page\nmarkup"));
    }

    #[tokio::test]
    async fn test_unavailable_watch_page_degrades() {
        let client = StubClient::new().with(&oembed(), 200, OEMBED_BODY);

        let page = fetch_youtube(&client, "https://youtu.be/abc123", &config())
            .await
            .unwrap();

        assert_eq!(page.has_transcript, Some(false));
        assert_eq!(page.transcript_source, None);
        assert!(page.content.ends_with(NO_TRANSCRIPT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_long_transcript_is_truncated() {
        let player = format!(
            r#"{{"videoDetails":{{"shortDescription":"{}"}}}}"#,
            "x".repeat(200)
        );
        let client = StubClient::new()
            .with(&oembed(), 200, OEMBED_BODY)
            .with(&watch(), 200, &watch_page(&player));
        let config = FetchConfig {
            max_content_length: 50,
            ..FetchConfig::default()
        };

        let page = fetch_youtube(&client, "https://youtu.be/abc123", &config)
            .await
            .unwrap();

        assert!(page.truncated);
        assert_eq!(page.content.chars().count(), 53);
        assert!(page.content_length > 200);
    }
}
