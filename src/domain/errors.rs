//! Error types for the Spckit recommendation core.
//!
//! Three layers of failure are distinguished:
//! - [`ApiError`]: transport-level failures talking to the Gemini API
//! - [`EmbeddingError`]: embedding operations that exhausted their retry budget
//! - [`GenerationError`]: generation calls and structured-response decoding

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Requested model or endpoint does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded, retry after waiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API server encountered an internal error
    #[error("API server error: {0}")]
    ServerError(String),

    /// API server is overloaded, retry later
    #[error("API server overloaded")]
    Overloaded,

    /// Network error occurred during request
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// JSON serialization or deserialization error
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Response arrived but carried no usable payload
    #[error("Empty response from API")]
    EmptyResponse,

    /// Unknown error occurred
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Returns true if this error is transient and should be retried
    ///
    /// Transient errors include:
    /// - Rate limit exceeded
    /// - Server errors (5xx)
    /// - Server overloaded
    /// - Network errors
    /// - Request timeouts
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded
                | Self::ServerError(_)
                | Self::Overloaded
                | Self::NetworkError(_)
                | Self::Timeout(_)
        )
    }

    /// Create error from HTTP status code and response body
    ///
    /// Maps HTTP status codes to error variants according to the Gemini API:
    /// - 400: Invalid request
    /// - 401, 403: Authentication failed
    /// - 404: Not found
    /// - 429: Rate limit exceeded
    /// - 503: Server overloaded
    /// - Other 5xx: Server error
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimitExceeded,
            503 => Self::Overloaded,
            500..=599 => Self::ServerError(body),
            _ => Self::Unknown(format!("HTTP {status}: {body}")),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::NetworkError(err)
        }
    }
}

/// Errors produced by the embedding client
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// A non-retryable API failure
    #[error("Embedding request failed: {0}")]
    Api(#[from] ApiError),

    /// The retry budget was spent without a successful embedding
    #[error("Embedding failed after {attempts} attempts for text '{text_prefix}...': {source}")]
    RetriesExhausted {
        /// Number of attempts made before giving up
        attempts: u32,
        /// Leading characters of the offending text, for diagnostics
        text_prefix: String,
        /// The last transport error observed
        source: ApiError,
    },
}

/// Errors produced by the generation orchestrator
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The generation API call itself failed
    #[error("Generation request failed: {0}")]
    Api(#[from] ApiError),

    /// The model response could not be decoded into the requested schema
    #[error("Failed to decode structured response: {reason}")]
    Decode {
        /// Parser diagnostic
        reason: String,
        /// Leading characters of the raw response, for diagnostics
        response_prefix: String,
    },
}
