//! Gemini HTTP client implementing the embedding and generation ports.

use std::time::Duration;

use anyhow::{anyhow, Context as _, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::ApiError;
use crate::domain::models::Config;
use crate::domain::ports::{EmbeddingApi, GenerationApi, GenerationParams, TaskType};
use crate::infrastructure::gemini::types::{
    BatchEmbedContentsRequest, BatchEmbedRequestItem, Content, EmbedContentRequest,
    EmbedContentResponse, GenerateContentRequest, GenerateContentResponse,
    GenerationConfigPayload,
};

/// HTTP client for the Google Generative Language API
///
/// Implements both the [`EmbeddingApi`] and [`GenerationApi`] ports. Holds no
/// mutable state; the underlying `reqwest::Client` is cheaply cloneable and
/// safe to share.
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    embedding_model: String,
    generation_model: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// The API key is taken from the config, falling back to the
    /// `GEMINI_API_KEY` environment variable.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api
            .key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                anyhow!("Gemini API key not set. Set GEMINI_API_KEY env var or configure api.key.")
            })?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            api_key,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            embedding_model: config.embedding.model.clone(),
            generation_model: config.generation.model.clone(),
        })
    }

    /// Model name without a `models/` prefix, for URL construction
    fn api_model_name(model: &str) -> &str {
        model.strip_prefix("models/").unwrap_or(model)
    }

    fn endpoint(&self, model: &str, operation: &str) -> String {
        format!(
            "{}/v1beta/models/{}:{operation}",
            self.base_url,
            Self::api_model_name(model)
        )
    }

    /// POST a request and decode the response, mapping failures onto
    /// [`ApiError`].
    async fn post<Req, Resp>(&self, url: &str, body: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(ApiError::from_status(status, body));
        }

        let parsed = response.json::<Resp>().await?;
        Ok(parsed)
    }
}

#[async_trait]
impl EmbeddingApi for GeminiClient {
    async fn embed_content(&self, text: &str, task: TaskType) -> Result<Vec<f32>, ApiError> {
        let url = self.endpoint(&self.embedding_model, "embedContent");
        let request = EmbedContentRequest {
            content: Content::from_text(text),
            task_type: task.as_str().to_string(),
        };

        let response: EmbedContentResponse = self.post(&url, &request).await?;
        Ok(response.embedding.values)
    }

    async fn batch_embed_contents(
        &self,
        texts: &[String],
        task: TaskType,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(&self.embedding_model, "batchEmbedContents");
        let model = format!("models/{}", Self::api_model_name(&self.embedding_model));
        let request = BatchEmbedContentsRequest {
            requests: texts
                .iter()
                .map(|text| BatchEmbedRequestItem {
                    model: model.clone(),
                    content: Content::from_text(text),
                    task_type: task.as_str().to_string(),
                })
                .collect(),
        };

        // The raw payload is handed back untouched: shape interpretation is
        // the embedder's job, not the transport's.
        self.post(&url, &request).await
    }
}

#[async_trait]
impl GenerationApi for GeminiClient {
    async fn generate_content(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(&self.generation_model, "generateContent");
        let request = GenerateContentRequest {
            contents: vec![Content::from_text(prompt)],
            generation_config: GenerationConfigPayload {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
                response_mime_type: "application/json".to_string(),
            },
        };

        let response: GenerateContentResponse = self.post(&url, &request).await?;
        response.first_text().ok_or(ApiError::EmptyResponse)
    }
}
