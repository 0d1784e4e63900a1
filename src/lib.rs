//! Spckit - Retrieval-Augmented PC Component Recommendation Core
//!
//! Spckit turns natural-language requests about PC components into structured
//! recommendations. It embeds text for semantic retrieval, formats retrieved
//! component records into a bounded context block, prompts a generative model
//! (Google Gemini), and deterministically decodes a structured answer out of
//! the model's raw output.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, error types, and port traits for the
//!   remote API seams
//! - **Service Layer** (`services`): Embedding client, context formatter,
//!   prompt builder, and response decoder
//! - **Infrastructure Layer** (`infrastructure`): Gemini HTTP client and
//!   configuration loading
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spckit::{Config, Embedder, GeminiClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = Arc::new(GeminiClient::new(&config)?);
//!     let embedder = Embedder::new(client, config.embedding);
//!     let vector = embedder.embed_query("quiet gaming build under 1500").await?;
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ApiError, EmbeddingError, GenerationError};
pub use domain::models::{
    ApiConfig, ComparisonResult, ComponentComparison, Config, EmbeddingConfig, GenerationConfig,
    RecommendationResult, RecommendedComponent, RetrievedComponent,
};
pub use domain::ports::{EmbeddingApi, GenerationApi, GenerationParams, TaskType};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::gemini::GeminiClient;
pub use services::{
    build_comparison_prompt, build_context, build_recommendation_prompt, decode_comparison,
    decode_recommendation, Embedder, RecommendationGenerator,
};
