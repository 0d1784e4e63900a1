//! Configuration models for the recommendation core.
//!
//! All knobs consumed by the core live here: API credential and endpoint,
//! model identifiers, retry budget, batch sizing, and generation parameters.
//! Values are externally supplied (YAML file or environment), never computed.

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini API connection settings
    pub api: ApiConfig,
    /// Embedding client settings
    pub embedding: EmbeddingConfig,
    /// Generation settings
    pub generation: GenerationConfig,
}

/// Gemini API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API key. Falls back to the `GEMINI_API_KEY` env var when unset.
    pub key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Embedding client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding model identifier
    pub model: String,
    /// Maximum attempts per text before giving up
    pub max_retries: u32,
    /// Base backoff delay in milliseconds; attempt k waits `retry_delay_ms * k`
    pub retry_delay_ms: u64,
    /// Number of texts submitted per remote batch call
    pub batch_size: usize,
    /// Fixed pause between batch chunks in milliseconds
    pub batch_pause_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-004".to_string(),
            max_retries: 3,
            retry_delay_ms: 1_000,
            batch_size: 100,
            batch_pause_ms: 500,
        }
    }
}

/// Generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Generation model identifier
    pub model: String,
    /// Sampling temperature for recommendations (0.0-1.0)
    pub temperature: f32,
    /// Sampling temperature for comparisons (0.0-1.0)
    pub comparison_temperature: f32,
    /// Maximum output tokens per generation
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro".to_string(),
            temperature: 0.7,
            comparison_temperature: 0.5,
            max_output_tokens: 2_048,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.embedding.model, "text-embedding-004");
        assert_eq!(config.embedding.max_retries, 3);
        assert_eq!(config.embedding.retry_delay_ms, 1_000);
        assert_eq!(config.embedding.batch_size, 100);
        assert_eq!(config.embedding.batch_pause_ms, 500);
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert!((config.generation.temperature - 0.7).abs() < f32::EPSILON);
        assert!((config.generation.comparison_temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.generation.max_output_tokens, 2_048);
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.key.is_none());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let yaml_equivalent = r#"{"embedding": {"batch_size": 10}}"#;
        let config: Config = serde_json::from_str(yaml_equivalent).unwrap();
        assert_eq!(config.embedding.batch_size, 10);
        assert_eq!(config.embedding.max_retries, 3);
        assert_eq!(config.generation.model, "gemini-2.5-pro");
    }
}
