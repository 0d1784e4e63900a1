//! Infrastructure layer module
//!
//! External integrations: the Gemini HTTP client and configuration loading.

pub mod config;
pub mod gemini;
