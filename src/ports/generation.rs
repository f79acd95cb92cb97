//! Generation Oracle Port - Interface for the text-generation service.
//!
//! Classification, question planning, and summarization all go through this
//! one seam. Implementations connect to an external LLM service and
//! translate its API into this contract; the core only ever needs the final
//! text of a completion.

use async_trait::async_trait;

/// Port for the external text-generation service.
///
/// Implementations must be safe for concurrent invocation: all context is
/// passed in with each request and no per-session state may be held inside.
#[async_trait]
pub trait GenerationOracle: Send + Sync {
    /// Generates a completion for the given request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, OracleError>;
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The full instruction prompt, context included.
    pub prompt: String,
    /// Maximum tokens to generate, provider default if unset.
    pub max_tokens: Option<u32>,
    /// Sampling temperature, provider default if unset.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Creates a request for the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// The completed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Generated text.
    pub content: String,
    /// Model that produced it, for logging.
    pub model: String,
}

impl GenerationResponse {
    /// Creates a response.
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
        }
    }
}

/// Generation oracle errors.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Failed to parse the provider response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl OracleError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OracleError::RateLimited { .. }
                | OracleError::Unavailable { .. }
                | OracleError::Network(_)
                | OracleError::Timeout { .. }
        )
    }
}
