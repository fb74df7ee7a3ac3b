//! LLM: Gemini adapter for comic script and image generation.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables. `LlmClient` binds a
//! `GeminiClient` to the configured model and output budget and implements
//! [`LlmGenerate`], the seam the script generator depends on.

pub mod config;
pub mod gemini;
pub mod schema;
pub mod types;

use config::LlmConfig;
use tracing::info;
pub use types::LlmGenerate;
use types::{GenerateResponse, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client backed by the Gemini REST API.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
    max_output_tokens: u32,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, a value fails to parse, or
    /// the HTTP client fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model, max_output_tokens: config.max_output_tokens })
    }

    /// Return the configured text model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Synthesize one image with an Imagen model, returned as a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or no image comes back.
    pub async fn generate_image(&self, image_model: &str, prompt: &str) -> Result<String, LlmError> {
        self.inner.predict_image(image_model, prompt).await
    }
}

#[async_trait::async_trait]
impl LlmGenerate for LlmClient {
    async fn generate_json(
        &self,
        prompt: &str,
        response_schema: &serde_json::Value,
    ) -> Result<GenerateResponse, LlmError> {
        let response = self
            .inner
            .generate_json(&self.model, self.max_output_tokens, prompt, response_schema)
            .await?;

        info!(
            model = %response.model,
            finish_reason = response.finish_reason.as_deref().unwrap_or("-"),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "llm: response"
        );

        Ok(response)
    }
}
