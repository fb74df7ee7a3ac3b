//! Generation pipeline: prompt → script → images → panels.
//!
//! Script generation runs first (images depend on its text), then every
//! panel image resolves concurrently, then the pure assembler numbers the
//! batch. Nothing here touches session state.

use comic::{AssembleError, ComicPanel, assemble_panels, last_panel_id, panels_to_script};
use tracing::info;

use super::image::{ImageResolver, resolve_all};
use super::script::{ScriptError, generate_continuation_script, generate_script};
use crate::llm::LlmGenerate;

/// Which entry point a pipeline run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Initial,
    Continuation,
}

impl PipelineStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Continuation => "continuation",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{stage} script generation failed: {source}")]
    Script {
        stage: PipelineStage,
        #[source]
        source: ScriptError,
    },
    #[error("panel assembly failed: {0}")]
    Assemble(#[from] AssembleError),
}

impl PipelineError {
    /// The single string shown in the UI error banner.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Script { stage: PipelineStage::Initial, .. } => "Failed to generate comic script from AI.",
            Self::Script { stage: PipelineStage::Continuation, .. } => {
                "Failed to generate continuation script from AI."
            }
            Self::Assemble(_) => "The comic panels could not be assembled. Please try again.",
        }
    }
}

/// Produce the opening batch, numbered from 1.
///
/// # Errors
///
/// Returns [`PipelineError::Script`] when the script cannot be generated.
pub async fn generate_comic_panels(
    llm: &dyn LlmGenerate,
    images: &dyn ImageResolver,
    story_prompt: &str,
    character_prompt: &str,
) -> Result<Vec<ComicPanel>, PipelineError> {
    let script = generate_script(llm, story_prompt, character_prompt)
        .await
        .map_err(|source| PipelineError::Script { stage: PipelineStage::Initial, source })?;

    let image_urls = resolve_all(images, &script, character_prompt).await;
    let panels = assemble_panels(script, image_urls, 0)?;
    info!(panels = panels.len(), "pipeline: initial batch assembled");
    Ok(panels)
}

/// Produce the next batch, numbered after the highest existing id.
///
/// # Errors
///
/// Returns [`PipelineError::Script`] when the script cannot be generated.
pub async fn continue_comic_panels(
    llm: &dyn LlmGenerate,
    images: &dyn ImageResolver,
    next_story_part: &str,
    character_prompt: &str,
    story_prompt: &str,
    existing_panels: &[ComicPanel],
) -> Result<Vec<ComicPanel>, PipelineError> {
    let existing_script = panels_to_script(existing_panels);
    let script =
        generate_continuation_script(llm, story_prompt, character_prompt, &existing_script, next_story_part)
            .await
            .map_err(|source| PipelineError::Script { stage: PipelineStage::Continuation, source })?;

    let image_urls = resolve_all(images, &script, character_prompt).await;
    let start_id = last_panel_id(existing_panels);
    let panels = assemble_panels(script, image_urls, start_id)?;
    info!(start_id, panels = panels.len(), "pipeline: continuation batch assembled");
    Ok(panels)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
