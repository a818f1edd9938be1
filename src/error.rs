use thiserror::Error;

/// Errors produced while turning a user-submitted URL into page content.
///
/// The `Display` text of each variant is the message returned to API
/// clients, so keep it user-facing.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request body had no usable `url` field
    #[error("URL is required")]
    MissingUrl,

    /// Input could not be parsed as an absolute URL
    #[error("Invalid URL format")]
    InvalidUrl(#[source] url::ParseError),

    /// None of the known YouTube URL shapes matched
    #[error("Invalid YouTube URL")]
    InvalidYouTubeUrl,

    /// Upstream server answered with a non-2xx status
    #[error("Failed to fetch URL: {status_text}")]
    Upstream { status: u16, status_text: String },

    /// oEmbed metadata for the video could not be obtained
    #[error("Video not found")]
    VideoNotFound,

    /// DNS, connection, TLS or body read failure
    #[error("Failed to fetch URL: {0}")]
    Network(String),
}

impl FetchError {
    /// HTTP status code the API answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::MissingUrl | FetchError::InvalidUrl(_) | FetchError::InvalidYouTubeUrl => {
                400
            }
            FetchError::Upstream { status, .. } => *status,
            FetchError::VideoNotFound => 404,
            FetchError::Network(_) => 500,
        }
    }

    /// Validation failures are reported before any network call is made
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FetchError::MissingUrl | FetchError::InvalidUrl(_) | FetchError::InvalidYouTubeUrl
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// Errors from the generative model API
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation API key is not configured; set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("Generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Model response did not contain an image")]
    NoImage,

    #[error("Video operation failed: {0}")]
    Operation(String),

    #[error("Video operation still running after {attempts} polls")]
    PollTimeout { attempts: u32 },

    #[error("Video operation finished without a video")]
    NoVideo,
}
