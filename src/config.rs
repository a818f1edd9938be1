use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for upstream content fetching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent sent with page requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept header sent with page requests
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Accept-Language header sent with page and watch-page requests
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Maximum number of characters of extracted content returned
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Base URL for watch pages and the oEmbed endpoint
    #[serde(default = "default_youtube_base_url")]
    pub youtube_base_url: String,

    /// Base URL for video thumbnails
    #[serde(default = "default_thumbnail_base_url")]
    pub thumbnail_base_url: String,
}

/// Settings for the generative model API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// API key; normally supplied through the environment
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the model API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model used for image generation
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Model used for video generation
    #[serde(default = "default_video_model")]
    pub video_model: String,

    /// Requested output image size
    #[serde(default = "default_image_size")]
    pub image_size: String,

    /// Delay between polls of a long-running operation
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Polls before a long-running operation is abandoned
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Per-request timeout for model API calls
    #[serde(default = "default_generation_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub generation: GenerationSettings,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7".to_string()
}

fn default_max_content_length() -> usize {
    15000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_youtube_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_thumbnail_base_url() -> String {
    "https://img.youtube.com".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_image_model() -> String {
    "gemini-3-pro-image-preview".to_string()
}

fn default_video_model() -> String {
    "veo-3.0-generate-001".to_string()
}

fn default_image_size() -> String {
    "2K".to_string()
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_max_poll_attempts() -> u32 {
    60
}

fn default_generation_timeout_secs() -> u64 {
    120
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            max_content_length: default_max_content_length(),
            request_timeout_secs: default_request_timeout_secs(),
            youtube_base_url: default_youtube_base_url(),
            thumbnail_base_url: default_thumbnail_base_url(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            image_model: default_image_model(),
            video_model: default_video_model(),
            image_size: default_image_size(),
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_attempts: default_max_poll_attempts(),
            request_timeout_secs: default_generation_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            fetch: FetchConfig::default(),
            generation: GenerationSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Recognized keys: `INFOGEN_BIND_ADDR`, `GEMINI_API_KEY`, and `API_KEY`
    /// as a fallback for the key. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(bind_addr) = non_empty("INFOGEN_BIND_ADDR") {
            ::log::debug!("Bind address overridden from environment: {}", bind_addr);
            self.bind_addr = bind_addr;
        }

        if let Some(api_key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.generation.api_key = Some(api_key);
        }

        self
    }
}
