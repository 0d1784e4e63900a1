//! Domain layer for the Spckit recommendation core
//!
//! Contains pure domain models, error types, and port traits. This layer has
//! no knowledge of HTTP transport or configuration files; infrastructure
//! adapters implement the ports defined here.

pub mod errors;
pub mod models;
pub mod ports;
