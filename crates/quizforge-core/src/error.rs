//! Error types.
//!
//! `ProviderError` lives here rather than in `quizforge-providers` so the
//! engine can downcast and classify failures for retry decisions without
//! string matching.

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response carried no message content.
    #[error("empty completion from model {0}")]
    EmptyCompletion(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_) | ProviderError::ModelNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

/// A failed stage of quiz generation.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The submitted form was rejected before any side effect.
    #[error("invalid quiz form: {0}")]
    InvalidForm(String),

    /// No language-model API key is configured.
    #[error("API not configured")]
    NotConfigured,

    /// The language model could not produce a reply.
    #[error("language model request failed: {0:#}")]
    Provider(anyhow::Error),

    /// The form or result could not be persisted.
    #[error("storage failed: {0:#}")]
    Storage(anyhow::Error),

    /// The text or PDF report could not be written.
    #[error("report output failed: {0:#}")]
    Report(anyhow::Error),
}
