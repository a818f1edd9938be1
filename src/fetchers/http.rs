use crate::config::FetchConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

/// A fully read upstream response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase for the status, e.g. "Not Found"
    pub status_text: String,
    /// URL after following redirects
    pub final_url: String,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Base trait for the upstream transport used by the fetchers
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` with the given headers, following redirects.
    ///
    /// Non-2xx responses are returned as `Ok`; only transport failures are
    /// errors.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FetchError>;
}

/// [`HttpClient`] backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client with the configured timeout
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;

        let status = response.status();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        ::log::trace!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            final_url,
            body,
        })
    }
}
