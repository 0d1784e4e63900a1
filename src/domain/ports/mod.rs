//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces that infrastructure
//! adapters must implement:
//! - `EmbeddingApi`: remote text-to-vector operations
//! - `GenerationApi`: remote prompt-to-text generation
//!
//! These traits define the contracts that allow the services layer to be
//! exercised against mock transports in tests.

pub mod embedding_api;
pub mod generation_api;

pub use embedding_api::{EmbeddingApi, TaskType};
pub use generation_api::{GenerationApi, GenerationParams};
