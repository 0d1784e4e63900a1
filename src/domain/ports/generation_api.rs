//! Generation port for remote prompt-to-text operations.

use async_trait::async_trait;

use crate::domain::errors::ApiError;

/// Parameters controlling a single generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature (0.0-1.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_output_tokens: u32,
}

/// Trait for remote generation operations
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Generate text for a prompt, requesting a JSON-formatted response.
    ///
    /// Returns the model's raw text output. The requested format is advisory;
    /// the model is not guaranteed to honor it.
    async fn generate_content(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ApiError>;
}
