//! Comic session: the controller state machine for one user's comic.
//!
//! DESIGN
//! ======
//! `Idle → Generating → (Ready | Failed)`, and from `Ready`/`Failed` a
//! continuation goes back through `Generating`. `Complete` replaces `Ready`
//! once the page count reaches `MAX_PAGES`.
//!
//! Each entry point is split into `begin_*` (validate, mark `Generating`, hand
//! back everything the pipeline needs) and `finish_*` (apply the result), so
//! the owner can release its lock while the model is working. `Generating`
//! is the single in-flight slot: a second `begin_*` while it is set fails
//! with [`SessionError::Busy`].
//!
//! TRADE-OFFS
//! ==========
//! A failed first batch leaves the panel list empty, while a failed
//! continuation keeps every earlier panel untouched.

use std::time::{Duration, Instant};

use comic::{ComicPanel, ComicSnapshot, MAX_PAGES, Phase, normalize_prompt};
use tracing::{info, warn};

use super::pipeline::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("A page is already being generated. Please wait for it to finish.")]
    Busy,
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("This comic already has {max_pages} pages and is complete.")]
    PageLimitReached { max_pages: u32 },
}

/// Inputs for an initial generation, captured at `begin_generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub story_prompt: String,
    pub character_prompt: String,
}

/// Inputs for a continuation, captured at `begin_continuation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationTicket {
    pub story_prompt: String,
    pub character_prompt: String,
    pub next_story_part: String,
    pub existing_panels: Vec<ComicPanel>,
}

#[derive(Debug, Clone)]
pub struct ComicSession {
    panels: Vec<ComicPanel>,
    page: u32,
    phase: Phase,
    error: Option<String>,
    story_prompt: Option<String>,
    character_prompt: Option<String>,
    last_active: Instant,
}

impl Default for ComicSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ComicSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            panels: Vec::new(),
            page: 0,
            phase: Phase::Idle,
            error: None,
            story_prompt: None,
            character_prompt: None,
            last_active: Instant::now(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn panels(&self) -> &[ComicPanel] {
        &self.panels
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Generating
    }

    /// How long since the session was last begun or finished.
    #[must_use]
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_active)
    }

    #[must_use]
    pub fn snapshot(&self) -> ComicSnapshot {
        ComicSnapshot {
            panels: self.panels.clone(),
            page: self.page,
            max_pages: MAX_PAGES,
            phase: self.phase,
            error: self.error.clone(),
            story_prompt: self.story_prompt.clone(),
            character_prompt: self.character_prompt.clone(),
        }
    }

    /// Discard everything and return to `Idle`. Refused while busy.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Busy`] while a batch is in flight.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        *self = Self::new();
        Ok(())
    }

    // =========================================================================
    // INITIAL GENERATION
    // =========================================================================

    /// Start a fresh comic: clears panels and error, records the prompts.
    ///
    /// # Errors
    ///
    /// [`SessionError::Busy`] while a batch is in flight, or
    /// [`SessionError::InvalidInput`] for a blank prompt.
    pub fn begin_generation(
        &mut self,
        story_prompt: &str,
        character_prompt: &str,
    ) -> Result<GenerationTicket, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        let story_prompt =
            normalize_prompt(story_prompt).ok_or(SessionError::InvalidInput("Please describe your story idea."))?;
        let character_prompt = normalize_prompt(character_prompt)
            .ok_or(SessionError::InvalidInput("Please describe your main character."))?;

        self.panels.clear();
        self.page = 0;
        self.error = None;
        self.story_prompt = Some(story_prompt.clone());
        self.character_prompt = Some(character_prompt.clone());
        self.enter(Phase::Generating);

        Ok(GenerationTicket { story_prompt, character_prompt })
    }

    /// Apply the result of an initial generation.
    pub fn finish_generation(&mut self, result: Result<Vec<ComicPanel>, PipelineError>) {
        match result {
            Ok(panels) => {
                self.panels = panels;
                self.page = 1;
                self.error = None;
                let phase = self.settled_phase();
                self.enter(phase);
            }
            Err(e) => {
                warn!(error = %e, "session: initial generation failed");
                self.panels.clear();
                self.page = 0;
                self.error = Some(e.user_message().to_owned());
                self.enter(Phase::Failed);
            }
        }
    }

    // =========================================================================
    // CONTINUATION
    // =========================================================================

    /// Start the next batch. Returns `Ok(None)` (no-op) when no story has
    /// been started yet.
    ///
    /// # Errors
    ///
    /// [`SessionError::Busy`] while a batch is in flight,
    /// [`SessionError::InvalidInput`] for a blank plot, or
    /// [`SessionError::PageLimitReached`] once the comic is complete.
    pub fn begin_continuation(&mut self, next_story_part: &str) -> Result<Option<ContinuationTicket>, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        let (Some(story_prompt), Some(character_prompt)) = (self.story_prompt.clone(), self.character_prompt.clone())
        else {
            info!("session: continuation ignored, no story started");
            return Ok(None);
        };
        let next_story_part = normalize_prompt(next_story_part)
            .ok_or(SessionError::InvalidInput("Please describe what happens next."))?;

        if self.page >= MAX_PAGES {
            return Err(SessionError::PageLimitReached { max_pages: MAX_PAGES });
        }

        self.error = None;
        self.enter(Phase::Generating);

        Ok(Some(ContinuationTicket {
            story_prompt,
            character_prompt,
            next_story_part,
            existing_panels: self.panels.clone(),
        }))
    }

    /// Apply the result of a continuation. Existing panels are never touched.
    pub fn finish_continuation(&mut self, result: Result<Vec<ComicPanel>, PipelineError>) {
        match result {
            Ok(new_panels) => {
                self.panels.extend(new_panels);
                self.page += 1;
                self.error = None;
                let phase = self.settled_phase();
                self.enter(phase);
            }
            Err(e) => {
                warn!(error = %e, "session: continuation failed");
                self.error = Some(e.user_message().to_owned());
                self.enter(Phase::Failed);
            }
        }
    }

    /// Settle an in-flight batch whose result was lost. Panels are left as
    /// `begin_*` prepared them.
    pub fn abandon_batch(&mut self, message: &str) {
        if !self.is_busy() {
            return;
        }
        warn!(message, "session: in-flight batch abandoned");
        self.error = Some(message.to_owned());
        self.enter(Phase::Failed);
    }

    fn settled_phase(&self) -> Phase {
        if self.page >= MAX_PAGES { Phase::Complete } else { Phase::Ready }
    }

    fn enter(&mut self, phase: Phase) {
        info!(from = ?self.phase, to = ?phase, page = self.page, panels = self.panels.len(), "session: transition");
        self.phase = phase;
        self.last_active = Instant::now();
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
