//! Embedding client with retry, backoff, and batch fallback.
//!
//! Converts text collections into embedding vectors while tolerating an
//! unreliable, rate-limited, format-inconsistent batch API. A chunk is
//! handled entirely by one strategy: either the batch response is accepted
//! as-is, or every text in the chunk is embedded individually. Batch and
//! per-item vectors are never mixed within a chunk, and the output always
//! preserves input order.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::domain::errors::EmbeddingError;
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::{EmbeddingApi, TaskType};
use crate::services::response_shape::{classify_batch_response, BatchResponseShape};

/// Number of leading characters kept for failure diagnostics
const TEXT_PREFIX_LEN: usize = 50;

/// Embedding client
///
/// Owns the retry/backoff policy for single-item calls and the
/// batch-vs-singleton fallback decision for batch calls. Stateless between
/// calls; safe to share across concurrent requests.
pub struct Embedder {
    api: Arc<dyn EmbeddingApi>,
    config: EmbeddingConfig,
}

impl Embedder {
    /// Create a new embedder over a transport implementation
    pub fn new(api: Arc<dyn EmbeddingApi>, config: EmbeddingConfig) -> Self {
        Self { api, config }
    }

    /// Embed a single text.
    ///
    /// Transient transport failures are retried up to `max_retries` attempts
    /// in total, waiting `retry_delay_ms * attempt_number` between attempts
    /// (linear backoff). Permanent failures (authentication, bad request)
    /// escalate immediately without burning the retry budget.
    pub async fn embed_text(
        &self,
        text: &str,
        task: TaskType,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempt = 1;

        loop {
            match self.api.embed_content(text, task).await {
                Ok(vector) => return Ok(vector),
                Err(err) if !err.is_transient() => {
                    error!("embedding failed permanently: {err}");
                    return Err(EmbeddingError::Api(err));
                }
                Err(err) => {
                    warn!(
                        "embedding attempt {attempt}/{max_attempts} failed: {err}"
                    );
                    if attempt >= max_attempts {
                        error!(
                            "embedding gave up after {attempt} attempts: '{}...'",
                            text_prefix(text)
                        );
                        return Err(EmbeddingError::RetriesExhausted {
                            attempts: attempt,
                            text_prefix: text_prefix(text),
                            source: err,
                        });
                    }
                    sleep(Duration::from_millis(
                        self.config.retry_delay_ms * u64::from(attempt),
                    ))
                    .await;
                    attempt += 1;
                }
            }
        }
    }

    /// Embed a search query
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_text(query, TaskType::RetrievalQuery).await
    }

    /// Embed a document for indexing
    pub async fn embed_document(&self, document: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_text(document, TaskType::RetrievalDocument).await
    }

    /// Embed a batch of texts, preserving input order.
    ///
    /// Texts are chunked by `batch_size`. Each chunk is first attempted as one
    /// remote batch call; if the response shape is unusable (transport error,
    /// unrecognized payload, or a detected silent fallback to single-item
    /// behavior) the whole chunk is re-embedded one text at a time. Any
    /// individual failure propagates immediately; no partial results are
    /// returned. A fixed pause separates chunks to respect upstream rate
    /// limits, with no pause after the final chunk.
    pub async fn embed_batch(
        &self,
        texts: &[String],
        task: TaskType,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.config.batch_size.max(1);
        let chunk_count = texts.len().div_ceil(batch_size);
        info!(
            "embedding {} texts in {} chunk(s) of up to {}",
            texts.len(),
            chunk_count,
            batch_size
        );

        let mut vectors = Vec::with_capacity(texts.len());
        for (index, chunk) in texts.chunks(batch_size).enumerate() {
            vectors.extend(self.embed_chunk(chunk, task).await?);

            if index + 1 < chunk_count {
                sleep(Duration::from_millis(self.config.batch_pause_ms)).await;
            }
        }

        debug_assert_eq!(vectors.len(), texts.len());
        info!("embedded {} texts", vectors.len());
        Ok(vectors)
    }

    /// Embed one chunk, deciding between the batch and per-item strategies.
    async fn embed_chunk(
        &self,
        chunk: &[String],
        task: TaskType,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let payload = match self.api.batch_embed_contents(chunk, task).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    "batch call failed for {}-text chunk, embedding individually: {err}",
                    chunk.len()
                );
                return self.embed_each(chunk, task).await;
            }
        };

        match classify_batch_response(&payload) {
            BatchResponseShape::VectorList(vectors) | BatchResponseShape::KeyedList(vectors)
                if vectors.len() == chunk.len() =>
            {
                debug!("batch call answered {} vectors", vectors.len());
                Ok(vectors)
            }
            // A lone flat vector is a legitimate answer for a one-text chunk
            BatchResponseShape::SingleVector(vector) if chunk.len() == 1 => Ok(vec![vector]),
            shape => {
                warn!(
                    "batch response shape '{}' unusable for {}-text chunk, embedding individually",
                    shape.kind(),
                    chunk.len()
                );
                self.embed_each(chunk, task).await
            }
        }
    }

    /// Embed every text of a chunk individually, in order.
    async fn embed_each(
        &self,
        chunk: &[String],
        task: TaskType,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(chunk.len());
        for text in chunk {
            vectors.push(self.embed_text(text, task).await?);
        }
        Ok(vectors)
    }
}

fn text_prefix(text: &str) -> String {
    text.chars().take(TEXT_PREFIX_LEN).collect()
}
