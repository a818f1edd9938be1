use crate::config::GenerationSettings;
use crate::error::GenerationError;
use crate::generation::catalog::AspectRatio;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Base64 payload with its MIME type, as sent to and returned by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

impl InlineData {
    /// Split a `data:<mime>;base64,<payload>` URL; a missing MIME type means JPEG
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        let (header, data) = data_url.split_once(',')?;
        let mime_type = header
            .strip_prefix("data:")
            .and_then(|rest| rest.strip_suffix(";base64"))
            .filter(|mime| !mime.is_empty())
            .unwrap_or("image/jpeg");

        Some(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: AspectRatio,
    pub image_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationConfig {
    pub image_config: ImageConfig,
}

/// Body of a `generateContent` call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: ImageGenerationConfig,
}

impl GenerateContentRequest {
    /// Prompt first, then the source images, then an optional style reference
    pub fn image(
        prompt: &str,
        images: &[InlineData],
        style_reference: Option<&InlineData>,
        aspect_ratio: AspectRatio,
        image_size: &str,
    ) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];

        parts.extend(images.iter().map(|image| Part::InlineData {
            inline_data: image.clone(),
        }));

        if let Some(reference) = style_reference {
            parts.push(Part::Text {
                text: "Reference Style Image:".to_string(),
            });
            parts.push(Part::InlineData {
                inline_data: reference.clone(),
            });
        }

        Self {
            contents: vec![Content { parts }],
            generation_config: ImageGenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio,
                    image_size: image_size.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

/// An image returned by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    /// Base64 encoded image bytes
    pub data: String,
}

impl GeneratedImage {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }

    /// File extension matching the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

impl GenerateContentResponse {
    /// First part of the first candidate that carries inline data
    pub fn first_image(&self) -> Option<GeneratedImage> {
        let content = self.candidates.first()?.content.as_ref()?;
        let inline = content
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())?;

        let mime_type = if inline.mime_type.is_empty() {
            DEFAULT_IMAGE_MIME.to_string()
        } else {
            inline.mime_type.clone()
        };

        Some(GeneratedImage {
            mime_type,
            data: inline.data.clone(),
        })
    }
}

/// A long-running operation as reported by the API
#[derive(Debug, Default, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
}

/// A finished video generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideo {
    /// Download location of the first generated sample
    pub uri: String,
}

impl Operation {
    fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|error| {
            error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string())
        })
    }

    fn video(&self) -> Option<GeneratedVideo> {
        let uri = self
            .response
            .as_ref()?
            .pointer("/generateVideoResponse/generatedSamples/0/video/uri")?
            .as_str()?;
        Some(GeneratedVideo {
            uri: uri.to_string(),
        })
    }
}

/// Polls `poll` until it yields a value, sleeping `interval` before each
/// attempt. Gives up with `PollTimeout` after `max_attempts` polls.
pub async fn poll_until_done<T, F, Fut>(
    interval: Duration,
    max_attempts: u32,
    mut poll: F,
) -> Result<T, GenerationError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, GenerationError>>,
{
    for attempt in 1..=max_attempts {
        tokio::time::sleep(interval).await;
        if let Some(value) = poll(attempt).await? {
            return Ok(value);
        }
        ::log::debug!("Operation not finished after poll {}/{}", attempt, max_attempts);
    }

    Err(GenerationError::PollTimeout {
        attempts: max_attempts,
    })
}

/// Client for the generative model REST API
#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(settings: GenerationSettings) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        self.settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::MissingApiKey)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.api_base.trim_end_matches('/'), path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, GenerationError> {
        let api_key = self.api_key()?;
        let response = request.header("x-goog-api-key", api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);

            if status.as_u16() == 403 || message.contains("PERMISSION_DENIED") {
                ::log::error!("API key missing or invalid; check GEMINI_API_KEY");
            }

            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<Value, GenerationError> {
        let url = self.endpoint(path);
        ::log::debug!("POST {}", url);
        self.send(self.http.post(url).json(body)).await
    }

    async fn get(&self, path: &str) -> Result<Value, GenerationError> {
        let url = self.endpoint(path);
        ::log::debug!("GET {}", url);
        self.send(self.http.get(url)).await
    }

    /// Generate one image and return the first inline image of the response
    pub async fn generate_image(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedImage, GenerationError> {
        self.api_key()?;

        ::log::info!(
            "Requesting image from {} ({})",
            self.settings.image_model,
            request.generation_config.image_config.aspect_ratio
        );

        let value = self
            .post(
                &format!("models/{}:generateContent", self.settings.image_model),
                request,
            )
            .await?;

        let response: GenerateContentResponse = serde_json::from_value(value).map_err(|e| {
            ::log::warn!("Unexpected generateContent response: {}", e);
            GenerationError::NoImage
        })?;

        response.first_image().ok_or(GenerationError::NoImage)
    }

    /// Run `count` image requests concurrently. Failed requests are logged
    /// and dropped; the successful images come back in completion order.
    pub async fn generate_variations(
        &self,
        request: &GenerateContentRequest,
        count: usize,
    ) -> Vec<GeneratedImage> {
        let mut tasks = JoinSet::new();
        for _ in 0..count {
            let client = self.clone();
            let request = request.clone();
            tasks.spawn(async move { client.generate_image(&request).await });
        }

        let mut images = Vec::with_capacity(count);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(image)) => images.push(image),
                Ok(Err(e)) => ::log::warn!("Variation failed: {}", e),
                Err(e) => ::log::warn!("Variation task did not finish: {}", e),
            }
        }

        ::log::info!("{} of {} variations succeeded", images.len(), count);
        images
    }

    /// Start a video generation and wait for it, bounded by the configured
    /// poll interval and attempt count
    pub async fn generate_video(
        &self,
        prompt: &str,
        image: Option<&InlineData>,
    ) -> Result<GeneratedVideo, GenerationError> {
        self.api_key()?;

        let mut instance = json!({ "prompt": prompt });
        if let Some(image) = image {
            instance["image"] = json!({
                "bytesBase64Encoded": image.data,
                "mimeType": image.mime_type,
            });
        }

        ::log::info!("Starting video generation with {}", self.settings.video_model);

        let value = self
            .post(
                &format!("models/{}:predictLongRunning", self.settings.video_model),
                &json!({ "instances": [instance] }),
            )
            .await?;
        let operation = parse_operation(value)?;

        let finished = if operation.done {
            operation
        } else {
            self.poll_operation(&operation.name).await?
        };

        if let Some(message) = finished.error_message() {
            return Err(GenerationError::Operation(message));
        }

        finished.video().ok_or(GenerationError::NoVideo)
    }

    /// Poll an operation by name until it reports `done`
    pub async fn poll_operation(&self, name: &str) -> Result<Operation, GenerationError> {
        ::log::info!("Polling operation {}", name);

        poll_until_done(
            Duration::from_secs(self.settings.poll_interval_secs),
            self.settings.max_poll_attempts,
            |_| async move {
                let operation = parse_operation(self.get(name).await?)?;
                Ok::<_, GenerationError>(operation.done.then_some(operation))
            },
        )
        .await
    }
}

fn parse_operation(value: Value) -> Result<Operation, GenerationError> {
    serde_json::from_value(value).map_err(|e| GenerationError::Operation(e.to_string()))
}
