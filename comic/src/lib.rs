//! Shared comic model for the studio server and the browser client.
//!
//! This crate owns the wire representation exchanged over the REST API and
//! the pure steps of the generation pipeline: assembling numbered panels from
//! scripts and image references, and grouping panels into display pages.

use serde::{Deserialize, Serialize};

/// Panels shown on one display page.
pub const PANELS_PER_PAGE: usize = 4;

/// Page count at which a comic is complete and continuation stops.
pub const MAX_PAGES: u32 = 10;

/// Error returned by [`assemble_panels`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    /// Every script needs exactly one image reference.
    #[error("script/image count mismatch: {scripts} scripts, {images} images")]
    CountMismatch { scripts: usize, images: usize },
}

// =============================================================================
// PANELS
// =============================================================================

/// The model's narrative unit for one panel, before an image is attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicPanelScript {
    /// Visual description handed to the illustrator (or image backend).
    pub scene_description: String,
    /// Narration or dialogue shown under the image.
    pub text: String,
}

/// One illustrated panel with a stable, session-unique id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicPanel {
    /// Starts at 1 and only ever grows within a session.
    pub id: u32,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub text: String,
    pub description: String,
}

/// Zip scripts and image references into panels numbered `start_id + 1 ..`.
///
/// # Errors
///
/// Returns [`AssembleError::CountMismatch`] when the two inputs differ in length.
pub fn assemble_panels(
    scripts: Vec<ComicPanelScript>,
    image_urls: Vec<String>,
    start_id: u32,
) -> Result<Vec<ComicPanel>, AssembleError> {
    if scripts.len() != image_urls.len() {
        return Err(AssembleError::CountMismatch { scripts: scripts.len(), images: image_urls.len() });
    }

    Ok(scripts
        .into_iter()
        .zip(image_urls)
        .zip(start_id + 1..)
        .map(|((script, image_url), id)| ComicPanel {
            id,
            image_url,
            text: script.text,
            description: script.scene_description,
        })
        .collect())
}

/// Convert existing panels back into script form for continuation context.
#[must_use]
pub fn panels_to_script(panels: &[ComicPanel]) -> Vec<ComicPanelScript> {
    panels
        .iter()
        .map(|p| ComicPanelScript { scene_description: p.description.clone(), text: p.text.clone() })
        .collect()
}

/// Highest panel id in `panels`, or 0 when there are none.
#[must_use]
pub fn last_panel_id(panels: &[ComicPanel]) -> u32 {
    panels.iter().map(|p| p.id).max().unwrap_or(0)
}

/// Group panels into consecutive display pages of [`PANELS_PER_PAGE`].
///
/// The final page is shorter only when the panel count is not a multiple of
/// the page size.
#[must_use]
pub fn group_into_pages(panels: &[ComicPanel]) -> Vec<&[ComicPanel]> {
    panels.chunks(PANELS_PER_PAGE).collect()
}

/// Trim a free-text prompt, returning `None` when nothing is left.
#[must_use]
pub fn normalize_prompt(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

// =============================================================================
// SESSION SNAPSHOT
// =============================================================================

/// Controller lifecycle for one comic session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing generated yet.
    #[default]
    Idle,
    /// A generation or continuation batch is in flight.
    Generating,
    /// Panels are available and more pages may be requested.
    Ready,
    /// The last batch failed; the error message explains why.
    Failed,
    /// The page cap was reached; no further continuation is offered.
    Complete,
}

/// Read-only view of a session, returned by every comic endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicSnapshot {
    pub panels: Vec<ComicPanel>,
    /// Generation batches consumed: 1 for the first, +1 per continuation.
    pub page: u32,
    pub max_pages: u32,
    pub phase: Phase,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub story_prompt: Option<String>,
    #[serde(default)]
    pub character_prompt: Option<String>,
}

impl Default for ComicSnapshot {
    fn default() -> Self {
        Self {
            panels: Vec::new(),
            page: 0,
            max_pages: MAX_PAGES,
            phase: Phase::Idle,
            error: None,
            story_prompt: None,
            character_prompt: None,
        }
    }
}

impl ComicSnapshot {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Generating
    }

    /// Whether the continue trigger should be offered.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        !self.panels.is_empty() && self.page < self.max_pages && !self.is_loading()
    }

    /// Whether the page cap has been reached with panels to show.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.panels.is_empty() && self.page >= self.max_pages && !self.is_loading()
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of `POST /api/comic/{session_id}/generate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub story_prompt: String,
    pub character_prompt: String,
}

/// Body of `POST /api/comic/{session_id}/continue`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueRequest {
    pub next_story_part: String,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
