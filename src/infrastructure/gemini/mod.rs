//! Gemini API integration
//!
//! HTTP adapter implementing the embedding and generation ports against the
//! Google Generative Language API.

pub mod client;
pub mod types;

pub use client::GeminiClient;
