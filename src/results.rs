use serde::{Deserialize, Serialize};

/// Kind of source a [`PageContent`] was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Webpage,
    Youtube,
}

/// Which extraction path produced the body of a YouTube page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptSource {
    /// Text of a caption track
    Captions,
    /// `shortDescription` from the embedded player response
    Description,
    /// `simpleText` description scraped from elsewhere in the page
    PageDescription,
}

/// Extracted content for one user-submitted URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// Canonical URL (final URL after redirects for webpages)
    pub url: String,

    pub title: String,

    pub description: String,

    pub og_image: Option<String>,

    /// Plain text content, possibly truncated
    pub content: String,

    /// Length in characters of the content before truncation
    pub content_length: usize,

    pub truncated: bool,

    #[serde(rename = "type")]
    pub kind: PageKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_transcript: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_source: Option<TranscriptSource>,
}

/// Video-specific fields of a YouTube [`PageContent`]
#[derive(Debug, Clone)]
pub struct VideoDetails {
    pub video_id: String,
    pub author: String,
    pub thumbnail: String,
    pub transcript_source: Option<TranscriptSource>,
}

impl PageContent {
    /// Create a webpage result
    pub fn webpage(
        url: String,
        title: String,
        description: String,
        og_image: Option<String>,
        body: crate::utils::Truncated,
    ) -> Self {
        Self {
            url,
            title,
            description,
            og_image,
            content: body.content,
            content_length: body.original_length,
            truncated: body.truncated,
            kind: PageKind::Webpage,
            video_id: None,
            author: None,
            thumbnail: None,
            has_transcript: None,
            transcript_source: None,
        }
    }

    /// Create a YouTube result; the thumbnail doubles as the preview image
    pub fn youtube(
        url: String,
        title: String,
        video: VideoDetails,
        body: crate::utils::Truncated,
    ) -> Self {
        Self {
            url,
            title,
            description: String::new(),
            og_image: Some(video.thumbnail.clone()),
            content: body.content,
            content_length: body.original_length,
            truncated: body.truncated,
            kind: PageKind::Youtube,
            video_id: Some(video.video_id),
            author: Some(video.author),
            thumbnail: Some(video.thumbnail),
            has_transcript: Some(video.transcript_source.is_some()),
            transcript_source: video.transcript_source,
        }
    }
}

/// Body of a successful `POST /api/fetch-url`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpageResponse {
    pub success: bool,
    pub url: String,
    pub title: String,
    pub description: String,
    pub og_image: Option<String>,
    pub content: String,
    pub content_length: usize,
    pub truncated: bool,
}

/// Body of a successful `POST /api/fetch-youtube`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: PageKind,
    pub video_id: String,
    pub url: String,
    pub title: String,
    pub author: String,
    pub thumbnail: String,
    pub content: String,
    pub has_transcript: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_source: Option<TranscriptSource>,
    pub content_length: usize,
    pub truncated: bool,
}

impl From<PageContent> for WebpageResponse {
    fn from(page: PageContent) -> Self {
        Self {
            success: true,
            url: page.url,
            title: page.title,
            description: page.description,
            og_image: page.og_image,
            content: page.content,
            content_length: page.content_length,
            truncated: page.truncated,
        }
    }
}

impl From<PageContent> for YouTubeResponse {
    fn from(page: PageContent) -> Self {
        Self {
            success: true,
            kind: PageKind::Youtube,
            video_id: page.video_id.unwrap_or_default(),
            url: page.url,
            title: page.title,
            author: page.author.unwrap_or_default(),
            thumbnail: page.thumbnail.unwrap_or_default(),
            content: page.content,
            has_transcript: page.has_transcript.unwrap_or(false),
            transcript_source: page.transcript_source,
            content_length: page.content_length,
            truncated: page.truncated,
        }
    }
}

/// Response shape matching the kind of page, used by `POST /api/fetch`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SourceResponse {
    Webpage(WebpageResponse),
    YouTube(YouTubeResponse),
}

impl From<PageContent> for SourceResponse {
    fn from(page: PageContent) -> Self {
        match page.kind {
            PageKind::Webpage => SourceResponse::Webpage(page.into()),
            PageKind::Youtube => SourceResponse::YouTube(page.into()),
        }
    }
}
