//! Request and response types for the Gemini API

use serde::{Deserialize, Serialize};

/// A content payload: an ordered list of parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Content parts
    pub parts: Vec<Part>,
}

impl Content {
    /// Wrap a single text in a content payload
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// A single text part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Literal text
    pub text: String,
}

/// Request body for `models/{model}:embedContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedContentRequest {
    /// Text to embed
    pub content: Content,
    /// Embedding intent (`RETRIEVAL_DOCUMENT` / `RETRIEVAL_QUERY`)
    pub task_type: String,
}

/// Request body for `models/{model}:batchEmbedContents`
#[derive(Debug, Clone, Serialize)]
pub struct BatchEmbedContentsRequest {
    /// One embed request per input text, in input order
    pub requests: Vec<BatchEmbedRequestItem>,
}

/// A single item inside a batch embed request.
///
/// Unlike the singleton endpoint, each batch item must repeat the model name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEmbedRequestItem {
    /// Fully qualified model name (`models/...`)
    pub model: String,
    /// Text to embed
    pub content: Content,
    /// Embedding intent
    pub task_type: String,
}

/// Response body for `models/{model}:embedContent`
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedContentResponse {
    /// The embedding payload
    pub embedding: EmbeddingValues,
}

/// Vector values within an embedding response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingValues {
    /// The embedding vector
    pub values: Vec<f32>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents; a single user turn for this core
    pub contents: Vec<Content>,
    /// Generation parameters
    pub generation_config: GenerationConfigPayload,
}

/// Generation parameters sent upstream
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfigPayload {
    /// Sampling temperature (0.0-1.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_output_tokens: u32,
    /// Requested response format; `application/json` for this core
    pub response_mime_type: String,
}

/// Response body for `models/{model}:generateContent`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generation candidates; the first carries the answer
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A single generation candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<String>(),
        )
    }
}
