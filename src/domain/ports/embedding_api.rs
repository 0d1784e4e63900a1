//! Embedding port for remote text-to-vector operations.
//!
//! The batch operation deliberately returns the raw JSON payload instead of a
//! parsed vector list: the remote batch contract is not stable across models,
//! so shape interpretation belongs to the caller's classification logic, not
//! the transport adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ApiError;

/// Embedding intent passed to the remote model.
///
/// Affects only the `taskType` parameter sent upstream; local handling is
/// identical for both variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    /// Text embedded as an indexed document
    RetrievalDocument,
    /// Text embedded as a search query
    RetrievalQuery,
}

impl TaskType {
    /// Wire value expected by the Gemini API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RetrievalDocument => "RETRIEVAL_DOCUMENT",
            Self::RetrievalQuery => "RETRIEVAL_QUERY",
        }
    }
}

/// Trait for remote embedding operations
#[async_trait]
pub trait EmbeddingApi: Send + Sync {
    /// Embed a single text, returning its vector.
    async fn embed_content(&self, text: &str, task: TaskType) -> Result<Vec<f32>, ApiError>;

    /// Embed several texts in one remote call.
    ///
    /// Returns the raw response payload; the shape is not guaranteed to match
    /// the batch contract and must be classified by the caller.
    async fn batch_embed_contents(
        &self,
        texts: &[String],
        task: TaskType,
    ) -> Result<serde_json::Value, ApiError>;
}
