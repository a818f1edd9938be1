// YouTube page parsing - video ids, the embedded player response and caption tracks

use crate::parsers::text;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

/// Known YouTube URL shapes, tried in order; the first capture is the video id
static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtube\.com/watch\?.+&v=)([^&]+)",
        r"youtu\.be/([^?&]+)",
        r"youtube\.com/embed/([^?&]+)",
        r"youtube\.com/v/([^?&]+)",
        r"youtube\.com/shorts/([^?&]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static PLAYER_RESPONSE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ytInitialPlayerResponse\s*=\s*\{").unwrap());

static PAGE_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""description":\s*\{"simpleText":\s*"([^"]+)""#).unwrap()
});

/// Reads `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A per-language subtitle resource listed in the player response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    #[serde(default, deserialize_with = "null_as_default")]
    pub language_code: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// The parts of `ytInitialPlayerResponse` used for transcripts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(default)]
    pub captions: Option<PlayerCaptions>,
    #[serde(default)]
    pub video_details: Option<PlayerVideoDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCaptions {
    #[serde(default)]
    pub player_captions_tracklist_renderer: Option<CaptionTracklist>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTracklist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerVideoDetails {
    #[serde(default)]
    pub short_description: Option<String>,
}

impl PlayerResponse {
    /// Caption tracks, empty when the video has none
    pub fn caption_tracks(&self) -> &[CaptionTrack] {
        self.captions
            .as_ref()
            .and_then(|c| c.player_captions_tracklist_renderer.as_ref())
            .map(|r| r.caption_tracks.as_slice())
            .unwrap_or(&[])
    }

    /// Non-empty `videoDetails.shortDescription`
    pub fn short_description(&self) -> Option<&str> {
        self.video_details
            .as_ref()
            .and_then(|d| d.short_description.as_deref())
            .filter(|d| !d.is_empty())
    }
}

/// Extract the video id from any of the known YouTube URL shapes
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Locate the `ytInitialPlayerResponse` object literal using brace counting.
///
/// Returns the JSON text of the object, or `None` when the marker is missing
/// or the braces never balance.
pub fn extract_player_response(html: &str) -> Option<&str> {
    let start = PLAYER_RESPONSE_START_RE.find(html)?;
    // The match ends just after the opening brace
    let json_start = start.end() - 1;
    let remaining = &html[json_start..];

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in remaining.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&remaining[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse the embedded player response; `None` if absent or not valid JSON
pub fn parse_player_response(html: &str) -> Option<PlayerResponse> {
    let json = extract_player_response(html)?;
    match serde_json::from_str(json) {
        Ok(response) => Some(response),
        Err(e) => {
            ::log::warn!("Failed to parse player response: {}", e);
            None
        }
    }
}

/// Pick the caption track to use: Korean, then English, then the first one
pub fn select_caption_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == "ko")
        .or_else(|| tracks.iter().find(|t| t.language_code == "en"))
        .or_else(|| tracks.first())
}

/// The short description found outside the player response, with `\n`
/// and `\"` unescaped
pub fn extract_page_description(html: &str) -> Option<String> {
    PAGE_DESCRIPTION_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| text::unescape_newlines_and_quotes(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str) -> CaptionTrack {
        CaptionTrack {
            language_code: code.to_string(),
            base_url: Some(format!("https://example.com/{}", code)),
        }
    }

    #[test]
    fn test_extract_video_id_all_shapes() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ];
        for url in urls {
            assert_eq!(
                extract_video_id(url).as_deref(),
                Some("dQw4w9WgXcQ"),
                "failed for {}",
                url
            );
        }
    }

    #[test]
    fn test_extract_video_id_stops_at_query() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc&t=42s").as_deref(),
            Some("abc")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/abc?si=xyz").as_deref(),
            Some("abc")
        );
        assert_eq!(
            extract_video_id("https://youtube.com/shorts/abc123").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_extract_video_id_v_later_in_query() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=abc").as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_extract_video_id_no_match() {
        assert_eq!(extract_video_id("https://www.google.com"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
    }

    #[test]
    fn test_extract_player_response_nested() {
        let html = r#"<script>var ytInitialPlayerResponse = {"outer":{"inner":"}"}};var other = {};</script>"#;
        assert_eq!(
            extract_player_response(html),
            Some(r#"{"outer":{"inner":"}"}}"#)
        );
    }

    #[test]
    fn test_extract_player_response_escaped_quotes() {
        let html = r#"ytInitialPlayerResponse={"text":"He said \"{hi\""};"#;
        assert_eq!(
            extract_player_response(html),
            Some(r#"{"text":"He said \"{hi\""}"#)
        );
    }

    #[test]
    fn test_extract_player_response_multibyte() {
        let html = r#"var ytInitialPlayerResponse = {"t":"한국어 자막"};"#;
        assert_eq!(extract_player_response(html), Some(r#"{"t":"한국어 자막"}"#));
    }

    #[test]
    fn test_extract_player_response_missing_or_unclosed() {
        assert_eq!(extract_player_response("<html></html>"), None);
        assert_eq!(
            extract_player_response(r#"var ytInitialPlayerResponse = {"a":{"b":1}"#),
            None
        );
    }

    #[test]
    fn test_parse_player_response_reads_tracks_and_description() {
        let html = r#"var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://example.com/en","languageCode":"en"}]}},"videoDetails":{"shortDescription":"About this video"}};"#;
        let response = parse_player_response(html).unwrap();
        assert_eq!(response.caption_tracks(), &[track("en")]);
        assert_eq!(response.short_description(), Some("About this video"));
    }

    #[test]
    fn test_parse_player_response_invalid_json() {
        let html = "var ytInitialPlayerResponse = {not json};";
        assert!(parse_player_response(html).is_none());
    }

    #[test]
    fn test_player_response_without_captions() {
        let response: PlayerResponse =
            serde_json::from_str(r#"{"videoDetails":{"shortDescription":""}}"#).unwrap();
        assert!(response.caption_tracks().is_empty());
        assert_eq!(response.short_description(), None);
    }

    #[test]
    fn test_null_fields_do_not_reject_player_response() {
        let response: PlayerResponse = serde_json::from_str(
            r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":null}},"videoDetails":{"shortDescription":"Still here"}}"#,
        )
        .unwrap();
        assert!(response.caption_tracks().is_empty());
        assert_eq!(response.short_description(), Some("Still here"));

        let response: PlayerResponse = serde_json::from_str(
            r#"{"captions":null,"videoDetails":{"shortDescription":null}}"#,
        )
        .unwrap();
        assert!(response.caption_tracks().is_empty());
        assert_eq!(response.short_description(), None);

        let tracks: Vec<CaptionTrack> = serde_json::from_str(
            r#"[{"languageCode":null,"baseUrl":"https://example.com/x"},{"languageCode":"en","baseUrl":null}]"#,
        )
        .unwrap();
        assert_eq!(tracks[0].language_code, "");
        assert_eq!(select_caption_track(&tracks).unwrap().language_code, "en");
    }

    #[test]
    fn test_select_caption_track_preference() {
        let tracks = vec![track("fr"), track("en"), track("ko")];
        assert_eq!(select_caption_track(&tracks).unwrap().language_code, "ko");

        let tracks = vec![track("fr"), track("en")];
        assert_eq!(select_caption_track(&tracks).unwrap().language_code, "en");

        let tracks = vec![track("fr"), track("de")];
        assert_eq!(select_caption_track(&tracks).unwrap().language_code, "fr");

        assert!(select_caption_track(&[]).is_none());
    }

    #[test]
    fn test_extract_page_description() {
        let html = r#"..."description":{"simpleText":"Line one\nLine two"},..."#;
        assert_eq!(
            extract_page_description(html).as_deref(),
            Some("Line one\nLine two")
        );
        assert_eq!(extract_page_description("<html></html>"), None);
    }
}
