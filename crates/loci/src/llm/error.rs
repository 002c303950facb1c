//! LLM provider error types.

use thiserror::Error;

/// Errors from calling a chat-completion or vision provider.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// API returned an error (5xx or a provider-level failure).
    #[error("api error: {0}")]
    ApiError(String),

    /// Rate limited (429).
    #[error("rate limit: {0}")]
    RateLimit(String),

    /// Authentication failed (401/403) or credentials missing.
    #[error("auth failed: {0}")]
    Auth(String),

    /// The request was rejected as invalid (other 4xx).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be parsed.
    #[error("parsing failed: {0}")]
    Parsing(String),
}
