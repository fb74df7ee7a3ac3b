//! Image resolver: scene description → image reference.
//!
//! DESIGN
//! ======
//! `ImageResolver` is a capability trait so the pipeline never cares where
//! pictures come from. Three backends ship:
//! - `placeholder`: a captioned placeholder URL built from the description
//! - `random`: a randomly seeded placeholder photo (non-deterministic)
//! - `imagen`: real synthesis through the Gemini Imagen endpoint
//!
//! ERROR HANDLING
//! ==============
//! Resolution never fails outward. [`resolve_panel_image`] swallows backend
//! errors and substitutes [`FALLBACK_IMAGE_URL`], so one bad panel cannot sink
//! a batch.

use std::sync::Arc;

use comic::ComicPanelScript;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::llm::LlmClient;
use crate::llm::types::LlmError;

pub const FALLBACK_IMAGE_URL: &str = "https://via.placeholder.com/400x400/4f46e5/ffffff?text=Comic+Panel";
pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-3.0-generate-002";

const PLACEHOLDER_BASE_URL: &str = "https://via.placeholder.com/400x400/4f46e5/ffffff";
const RANDOM_PHOTO_BASE_URL: &str = "https://picsum.photos/seed";
const CAPTION_MAX_CHARS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("invalid image URL: {0}")]
    InvalidUrl(String),
    #[error("image generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// Resolves one panel's scene description to something an `<img src>` accepts.
#[async_trait::async_trait]
pub trait ImageResolver: Send + Sync {
    /// # Errors
    ///
    /// Backend-specific; callers go through [`resolve_panel_image`], which
    /// never propagates these.
    async fn resolve(&self, description: &str, character_prompt: &str) -> Result<String, ImageError>;
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBackend {
    Placeholder,
    Random,
    Imagen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageConfig {
    pub backend: ImageBackend,
    pub imagen_model: String,
}

impl ImageConfig {
    /// Read `COMIC_IMAGE_BACKEND` (default `placeholder`) and `COMIC_IMAGE_MODEL`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] for an unknown backend name.
    pub fn from_env() -> Result<Self, LlmError> {
        let backend = parse_backend(std::env::var("COMIC_IMAGE_BACKEND").ok().as_deref())?;
        let imagen_model = std::env::var("COMIC_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGEN_MODEL.to_owned());
        Ok(Self { backend, imagen_model })
    }
}

fn parse_backend(raw: Option<&str>) -> Result<ImageBackend, LlmError> {
    match raw.unwrap_or("placeholder") {
        "placeholder" => Ok(ImageBackend::Placeholder),
        "random" => Ok(ImageBackend::Random),
        "imagen" => Ok(ImageBackend::Imagen),
        other => Err(LlmError::ConfigParse(format!(
            "unknown COMIC_IMAGE_BACKEND '{other}' (expected 'placeholder', 'random' or 'imagen')"
        ))),
    }
}

/// Build the resolver selected by `config`.
#[must_use]
pub fn build_resolver(config: &ImageConfig, llm: Arc<LlmClient>) -> Arc<dyn ImageResolver> {
    match config.backend {
        ImageBackend::Placeholder => Arc::new(CaptionedPlaceholder),
        ImageBackend::Random => Arc::new(RandomPlaceholder),
        ImageBackend::Imagen => Arc::new(ImagenResolver { llm, model: config.imagen_model.clone() }),
    }
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Placeholder tile captioned with the start of the scene description.
pub struct CaptionedPlaceholder;

#[async_trait::async_trait]
impl ImageResolver for CaptionedPlaceholder {
    async fn resolve(&self, description: &str, _character_prompt: &str) -> Result<String, ImageError> {
        captioned_placeholder_url(description)
    }
}

/// Randomly seeded stock photo; two calls for the same scene differ.
pub struct RandomPlaceholder;

#[async_trait::async_trait]
impl ImageResolver for RandomPlaceholder {
    async fn resolve(&self, _description: &str, _character_prompt: &str) -> Result<String, ImageError> {
        let seed: u32 = rand::random();
        Ok(format!("{RANDOM_PHOTO_BASE_URL}/{seed:08x}/400/400"))
    }
}

/// Real illustration through the Imagen `:predict` endpoint.
pub struct ImagenResolver {
    llm: Arc<LlmClient>,
    model: String,
}

#[async_trait::async_trait]
impl ImageResolver for ImagenResolver {
    async fn resolve(&self, description: &str, character_prompt: &str) -> Result<String, ImageError> {
        let prompt = build_illustration_prompt(description, character_prompt);
        Ok(self.llm.generate_image(&self.model, &prompt).await?)
    }
}

pub(crate) fn captioned_placeholder_url(description: &str) -> Result<String, ImageError> {
    let caption: String = description.chars().take(CAPTION_MAX_CHARS).collect();
    reqwest::Url::parse_with_params(PLACEHOLDER_BASE_URL, &[("text", caption.as_str())])
        .map(String::from)
        .map_err(|e| ImageError::InvalidUrl(e.to_string()))
}

#[must_use]
pub fn build_illustration_prompt(description: &str, character_prompt: &str) -> String {
    format!(
        "Create an image for a comic book panel in a vibrant, dynamic, American comic book art style.\n\
         The scene is: \"{description}\".\n\
         The main character is consistently portrayed as: \"{character_prompt}\".\n\
         The image should be action-packed, colorful, and have clear line art with dramatic shading."
    )
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Resolve one panel image, substituting [`FALLBACK_IMAGE_URL`] on any error.
pub async fn resolve_panel_image(resolver: &dyn ImageResolver, description: &str, character_prompt: &str) -> String {
    debug!(description, "image: resolving panel");
    match resolver.resolve(description, character_prompt).await {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "image: resolution failed, using fallback");
            FALLBACK_IMAGE_URL.to_owned()
        }
    }
}

/// Resolve every script's image concurrently. Output order matches `scripts`.
pub async fn resolve_all(
    resolver: &dyn ImageResolver,
    scripts: &[ComicPanelScript],
    character_prompt: &str,
) -> Vec<String> {
    join_all(
        scripts
            .iter()
            .map(|script| resolve_panel_image(resolver, &script.scene_description, character_prompt)),
    )
    .await
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
