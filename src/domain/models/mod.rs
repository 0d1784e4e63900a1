//! Domain models for the Spckit recommendation core

pub mod component;
pub mod config;
pub mod recommendation;

pub use component::RetrievedComponent;
pub use config::{ApiConfig, Config, EmbeddingConfig, GenerationConfig};
pub use recommendation::{
    ComparisonResult, ComponentComparison, RecommendationResult, RecommendedComponent,
};
