//! Google Gemini provider implementation
//!
//! Embeddings and answer generation through the Generative Language API.
//!
//! API Documentation: https://ai.google.dev/api

pub mod types;

use crate::embeddings::{self, EmbeddingError, Embedder};
use crate::generation::{self, ChatModel, ChatRequest, GenerationError};
use crate::providers::{truncate, ProviderError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use types::*;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const API_BASE_ENV: &str = "DOCQA_API_BASE";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const EMBEDDING_MODEL: &str = "models/embedding-001";
pub const CHAT_MODEL: &str = "gemini-2.0-flash";

/// Most requests the API accepts in one batchEmbedContents call
pub const MAX_EMBED_BATCH: usize = 100;

/// Connection settings for the Gemini API
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub embedding_model: String,
    pub chat_model: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            embedding_model: EMBEDDING_MODEL.to_string(),
            chat_model: CHAT_MODEL.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Read the API key (and optional base URL override) from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingApiKey(API_KEY_ENV))?;

        let config = Self::new(api_key);
        Ok(match lookup(API_BASE_ENV).filter(|b| !b.trim().is_empty()) {
            Some(base) => config.with_api_base(base.trim()),
            None => config,
        })
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("embedding_model", &self.embedding_model)
            .field("chat_model", &self.chat_model)
            .finish()
    }
}

/// Shared HTTP client for Gemini endpoints
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Arc<GeminiConfig>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Full URL of a model method, e.g. `.../v1beta/models/gemini-2.0-flash:generateContent`
    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/v1beta/{}:{}",
            self.config.api_base.trim_end_matches('/'),
            model_path(model),
            method
        )
    }

    /// Make an authenticated POST request
    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url, "gemini request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthFailed(error_message(&text)));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(ProviderError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("{}: {}", status, error_message(&text))));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ProviderError::Parse(format!("{}: {}", e, truncate(&text, 200))))
    }
}

/// Embedder backed by `batchEmbedContents`
#[derive(Clone)]
pub struct GeminiEmbedder {
    client: GeminiClient,
}

impl GeminiEmbedder {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        &self.client.config().embedding_model
    }

    async fn embed_request(&self, texts: &[String]) -> embeddings::Result<Vec<Vec<f32>>> {
        let model = model_path(self.model());
        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: &model,
                    content: Content::text(text),
                })
                .collect(),
        };

        let url = self.client.endpoint(&model, "batchEmbedContents");
        let response: BatchEmbedResponse = self.client.post_json(&url, &request).await?;

        if response.embeddings.len() != texts.len() {
            return Err(EmbeddingError::Malformed(format!(
                "{} embeddings returned for {} inputs",
                response.embeddings.len(),
                texts.len()
            )));
        }

        let vectors: Vec<Vec<f32>> = response.embeddings.into_iter().map(|e| e.values).collect();
        if let Some(i) = vectors.iter().position(|v| v.is_empty()) {
            return Err(EmbeddingError::Malformed(format!(
                "embedding {} has no values",
                i
            )));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> embeddings::Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(MAX_EMBED_BATCH) {
            vectors.extend(self.embed_request(batch).await?);
        }
        Ok(vectors)
    }

    async fn embed(&self, text: &str) -> embeddings::Result<Vec<f32>> {
        self.embed_request(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| EmbeddingError::Malformed("no embedding returned".to_string()))
    }
}

/// Chat model backed by `generateContent`
#[derive(Clone)]
pub struct GeminiChat {
    client: GeminiClient,
}

impl GeminiChat {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        &self.client.config().chat_model
    }
}

#[async_trait]
impl ChatModel for GeminiChat {
    async fn generate(&self, request: &ChatRequest) -> generation::Result<String> {
        let body = GenerateContentRequest {
            system_instruction: Content::text(&request.system),
            contents: vec![Content::user(&request.user)],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        let url = self.client.endpoint(self.model(), "generateContent");
        let response: GenerateContentResponse = self.client.post_json(&url, &body).await?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse(response.empty_reason()));
        }
        Ok(text)
    }
}

/// `gemini-2.0-flash` and `models/gemini-2.0-flash` name the same resource
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Prefer the API's own error message over the raw body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(status) => format!("{} ({})", parsed.error.message, status),
            None => parsed.error.message,
        },
        Err(_) => truncate(body, 500),
    }
}

/// No request timeout: a slow answer is waited for.
fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(ProviderError::Network)
}
