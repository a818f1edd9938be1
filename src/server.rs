use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fetchers::{self, HttpClient};
use crate::results::{SourceResponse, WebpageResponse, YouTubeResponse};
use crate::router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn HttpClient>,
    pub config: Arc<FetchConfig>,
}

impl AppState {
    pub fn new(client: Arc<dyn HttpClient>, config: FetchConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the API router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/fetch-url",
            post(fetch_url).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/fetch-youtube",
            post(fetch_youtube).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/fetch",
            post(fetch_any).options(preflight).fallback(method_not_allowed),
        )
        .layer(middleware::map_response(add_cors_headers))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    ::log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

/// The `url` string from a JSON body; anything else is `MissingUrl`
fn requested_url(body: &[u8]) -> Result<String, FetchError> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("url").and_then(Value::as_str).map(str::to_string))
        .filter(|url| !url.is_empty())
        .ok_or(FetchError::MissingUrl)
}

fn log_failure(endpoint: &str, err: &FetchError) {
    if err.status_code() >= 500 {
        ::log::error!("{} error: {}", endpoint, err);
    } else {
        ::log::warn!("{} rejected: {}", endpoint, err);
    }
}

async fn fetch_url(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match requested_url(&body) {
        Ok(url) => fetchers::fetch_webpage(state.client.as_ref(), &url, &state.config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(page) => Json(WebpageResponse::from(page)).into_response(),
        Err(e) => {
            log_failure("fetch-url", &e);
            e.into_response()
        }
    }
}

async fn fetch_youtube(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match requested_url(&body) {
        Ok(url) => fetchers::fetch_youtube(state.client.as_ref(), &url, &state.config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(page) => Json(YouTubeResponse::from(page)).into_response(),
        Err(e) => {
            log_failure("fetch-youtube", &e);
            e.into_response()
        }
    }
}

async fn fetch_any(State(state): State<AppState>, body: Bytes) -> Response {
    let result = match requested_url(&body) {
        Ok(url) => router::fetch_source(state.client.as_ref(), &url, &state.config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(page) => Json(SourceResponse::from(page)).into_response(),
        Err(e) => {
            log_failure("fetch", &e);
            e.into_response()
        }
    }
}
