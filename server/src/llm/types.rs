//! LLM types: provider-neutral request/response shapes and errors.
//!
//! The comic pipeline only ever asks for one thing: a single prompt answered
//! with JSON that matches a response schema. [`LlmGenerate`] is that seam, so
//! the script generator can be exercised against scripted mocks.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// None of the accepted API key environment variables is set.
    #[error("missing API key: none of {vars} is set")]
    MissingApiKey { vars: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The provider answered without any usable candidate text.
    #[error("API response contained no text")]
    EmptyResponse,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Whether a fresh attempt could plausibly succeed.
    ///
    /// Informational only: the pipeline never retries on its own.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Text answer from a structured-output generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Concatenated candidate text; JSON when a response schema was supplied.
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// LLM GENERATE TRAIT
// =============================================================================

/// Provider-neutral async trait for schema-constrained generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmGenerate: Send + Sync {
    /// Send `prompt` and ask for a JSON answer matching `response_schema`.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is malformed.
    async fn generate_json(
        &self,
        prompt: &str,
        response_schema: &serde_json::Value,
    ) -> Result<GenerateResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
