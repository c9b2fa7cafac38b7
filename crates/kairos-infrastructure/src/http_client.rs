//! HttpApiClient - REST implementation of the Kairos backend API.
//!
//! Every call is a single attempt bounded by a timeout: 60 seconds for chat,
//! 30 seconds for everything else unless configured otherwise. A request that
//! exceeds its bound is dropped, which aborts the underlying connection, and
//! reported as `KairosError::Timeout`.

use async_trait::async_trait;
use kairos_core::KairosApi;
use kairos_core::chat::{Acknowledgement, ChatMessage, ChatRequest, ChatResponse, HistoryPayload};
use kairos_core::config::ApiConfig;
use kairos_core::memory::{CreateMemoryRequest, Memory, MemoryListPayload, MemoryPayload};
use kairos_core::stats::{DatabaseStats, StatsPayload};
use kairos_core::{KairosError, Result};
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Client for the Kairos backend.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    default_timeout: Duration,
    chat_timeout: Duration,
    cancel: CancellationToken,
}

impl HttpApiClient {
    /// Creates a client from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(config.normalized_base_url()).map_err(|e| {
            KairosError::config(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(KairosError::config(format!(
                "API base URL '{}' cannot have path segments",
                config.base_url
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| KairosError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            default_timeout: config.default_timeout(),
            chat_timeout: config.chat_timeout(),
            cancel: CancellationToken::new(),
        })
    }

    /// Overrides both timeouts.
    pub fn with_timeouts(mut self, default_timeout: Duration, chat_timeout: Duration) -> Self {
        self.default_timeout = default_timeout;
        self.chat_timeout = chat_timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Aborts every in-flight request and fails future ones with `Cancelled`.
    pub fn shutdown(&self) {
        tracing::debug!("[HttpApiClient] Shutting down, cancelling in-flight requests");
        self.cancel.cancel();
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| KairosError::config("API base URL cannot have path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        let request = self.request(Method::GET, url);
        self.execute(request, self.default_timeout).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        timeout: Duration,
    ) -> Result<Option<T>> {
        let request = self.request(Method::POST, url).json(body);
        self.execute(request, timeout).await
    }

    async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        let request = self.request(Method::DELETE, url);
        self.execute(request, self.default_timeout).await
    }

    /// Sends the request and decodes the JSON body.
    ///
    /// Empty and `null` bodies decode to `Ok(None)`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<Option<T>> {
        let request = request
            .timeout(timeout)
            .build()
            .map_err(|e| KairosError::network(format!("Failed to build request: {}", e)))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let started = Instant::now();

        tracing::debug!("[HttpApiClient] {} {}", method, path);

        let exchange = async {
            let response = self
                .client
                .execute(request)
                .await
                .map_err(|e| transport_error(e, timeout))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| transport_error(e, timeout))?;
            Ok::<_, KairosError>((status, body))
        };

        let (status, body) = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("[HttpApiClient] {} {} cancelled", method, path);
                return Err(KairosError::Cancelled);
            }
            outcome = tokio::time::timeout(timeout, exchange) => match outcome {
                Ok(result) => result?,
                Err(_) => {
                    tracing::warn!(
                        "[HttpApiClient] {} {} timed out after {:?}",
                        method,
                        path,
                        timeout
                    );
                    return Err(KairosError::timeout(timeout));
                }
            },
        };

        tracing::debug!(
            "[HttpApiClient] {} {} -> {} ({} ms)",
            method,
            path,
            status.as_u16(),
            started.elapsed().as_millis()
        );

        if !status.is_success() {
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(
                "[HttpApiClient] {} {} failed with {}: {}",
                method,
                path,
                status.as_u16(),
                message
            );
            return Err(KairosError::http(status.as_u16(), message));
        }

        decode_body(&body)
    }
}

/// Maps reqwest failures onto the client taxonomy.
fn transport_error(err: reqwest::Error, timeout: Duration) -> KairosError {
    if err.is_timeout() {
        KairosError::timeout(timeout)
    } else {
        KairosError::network(err.to_string())
    }
}

/// Extracts the backend's `{"error": "..."}` message, falling back to the raw body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => ["error", "message", "detail"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .or_else(|| Some(trimmed.to_string())),
        Err(_) => Some(trimmed.to_string()),
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

#[async_trait]
impl KairosApi for HttpApiClient {
    async fn chat(&self, request: &ChatRequest) -> Result<Option<ChatResponse>> {
        let url = self.endpoint(&["chat"])?;
        self.post(url, request, self.chat_timeout).await
    }

    async fn chat_history(&self, limit: Option<u32>) -> Result<Option<Vec<ChatMessage>>> {
        let mut url = self.endpoint(&["chat-history"])?;
        if let Some(limit) = limit {
            url.query_pairs_mut().append_pair("limit", &limit.to_string());
        }
        let payload: Option<HistoryPayload> = self.get(url).await?;
        Ok(payload.map(HistoryPayload::into_messages))
    }

    async fn delete_chat_history(&self) -> Result<Option<Acknowledgement>> {
        let url = self.endpoint(&["chat-history"])?;
        self.delete(url).await
    }

    async fn delete_chat_message(&self, id: &str) -> Result<Option<Acknowledgement>> {
        let url = self.endpoint(&["chat-history", id])?;
        self.delete(url).await
    }

    async fn memories(&self) -> Result<Option<Vec<Memory>>> {
        let url = self.endpoint(&["memories"])?;
        let payload: Option<MemoryListPayload> = self.get(url).await?;
        Ok(payload.and_then(MemoryListPayload::into_memories))
    }

    async fn memory_by_id(&self, id: &str) -> Result<Option<Memory>> {
        let url = self.endpoint(&["memories", id])?;
        let payload: Option<MemoryPayload> = self.get(url).await?;
        Ok(payload.and_then(MemoryPayload::into_memory))
    }

    async fn add_memory(&self, request: &CreateMemoryRequest) -> Result<Option<Acknowledgement>> {
        let url = self.endpoint(&["memories"])?;
        self.post(url, request, self.default_timeout).await
    }

    async fn delete_memory(&self, id: &str) -> Result<Option<Acknowledgement>> {
        let url = self.endpoint(&["memories", id])?;
        self.delete(url).await
    }

    async fn delete_memories(&self) -> Result<Option<Acknowledgement>> {
        let url = self.endpoint(&["memories"])?;
        self.delete(url).await
    }

    async fn stats(&self) -> Result<Option<DatabaseStats>> {
        let url = self.endpoint(&["stats"])?;
        let payload: Option<StatsPayload> = self.get(url).await?;
        Ok(payload.and_then(StatsPayload::into_stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpApiClient {
        HttpApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_join_base_path() {
        let client = client("http://localhost:8000/api/");
        assert_eq!(
            client.endpoint(&["chat-history"]).unwrap().as_str(),
            "http://localhost:8000/api/chat-history"
        );
        assert_eq!(
            client.endpoint(&["memories", "favourite tea"]).unwrap().as_str(),
            "http://localhost:8000/api/memories/favourite%20tea"
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = HttpApiClient::new(&ApiConfig {
            base_url: "not a url".into(),
            ..ApiConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, KairosError::Config(_)));
    }

    #[test]
    fn error_message_prefers_backend_field() {
        assert_eq!(
            error_message(r#"{"error": "Message is required"}"#).as_deref(),
            Some("Message is required")
        );
        assert_eq!(error_message("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(error_message("  "), None);
    }

    #[test]
    fn empty_and_null_bodies_decode_to_none() {
        assert_eq!(decode_body::<Acknowledgement>("").unwrap(), None);
        assert_eq!(decode_body::<Acknowledgement>("null").unwrap(), None);
        assert!(decode_body::<ChatResponse>("{\"nope\": 1}").is_err());
    }
}
