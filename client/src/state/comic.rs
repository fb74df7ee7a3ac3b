//! Client-side mirror of the server's comic session.
//!
//! DESIGN
//! ======
//! The server is the single owner of panels, page count, and phase. This
//! state holds the last snapshot it returned plus the two things only the
//! browser knows: which session id it is talking to, and whether a request
//! is on the wire. Every visibility rule the studio page needs is derived
//! here so components stay declarative.

#[cfg(test)]
#[path = "comic_test.rs"]
mod comic_test;

use comic::{ComicPanel, ComicSnapshot, Phase, group_into_pages};
use uuid::Uuid;

/// Comic studio state, provided as `RwSignal<ComicState>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComicState {
    /// Browser-persisted session key; `None` until mounted in the browser.
    pub session_id: Option<Uuid>,
    /// Last snapshot received from the server.
    pub snapshot: ComicSnapshot,
    /// A generate/continue/reset request is awaiting its response.
    pub in_flight: bool,
    /// Transport failure that never produced a snapshot.
    pub network_error: Option<String>,
}

impl ComicState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight || self.snapshot.is_loading()
    }

    /// Error banner text, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.network_error.as_deref().or(self.snapshot.error.as_deref())
    }

    #[must_use]
    pub fn panels(&self) -> &[ComicPanel] {
        &self.snapshot.panels
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.snapshot.page
    }

    /// Panels grouped into display pages, in id order.
    #[must_use]
    pub fn pages(&self) -> Vec<Vec<ComicPanel>> {
        group_into_pages(&self.snapshot.panels)
            .into_iter()
            .map(<[ComicPanel]>::to_vec)
            .collect()
    }

    #[must_use]
    pub fn show_prompt_form(&self) -> bool {
        !self.is_loading() && self.snapshot.panels.is_empty()
    }

    #[must_use]
    pub fn show_continue_form(&self) -> bool {
        !self.is_loading() && self.snapshot.can_continue()
    }

    #[must_use]
    pub fn show_completion(&self) -> bool {
        !self.is_loading() && self.snapshot.is_complete()
    }

    #[must_use]
    pub fn show_new_comic(&self) -> bool {
        !self.is_loading() && !self.snapshot.panels.is_empty()
    }

    /// Optimistically mirror an initial generation: old panels disappear
    /// and the loader shows until the server answers.
    pub fn begin_generation(&mut self) {
        self.in_flight = true;
        self.network_error = None;
        self.snapshot.panels.clear();
        self.snapshot.page = 0;
        self.snapshot.error = None;
        self.snapshot.phase = Phase::Generating;
    }

    /// Optimistically mirror a continuation: existing panels stay visible.
    pub fn begin_continuation(&mut self) {
        self.in_flight = true;
        self.network_error = None;
        self.snapshot.error = None;
        self.snapshot.phase = Phase::Generating;
    }

    /// Start a reset request; panels stay until the server confirms.
    pub fn begin_reset(&mut self) {
        self.in_flight = true;
        self.network_error = None;
    }

    /// Replace the mirror with the server's answer.
    pub fn apply_snapshot(&mut self, snapshot: ComicSnapshot) {
        self.snapshot = snapshot;
        self.in_flight = false;
        self.network_error = None;
    }

    /// Apply the outcome of any comic request.
    pub fn apply_response(&mut self, response: Result<ComicSnapshot, String>) {
        match response {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(message) => self.apply_failure(message),
        }
    }

    /// The server reports a batch in flight that this tab did not start,
    /// e.g. after a reload mid-generation. The page polls while this holds.
    #[must_use]
    pub fn awaiting_server(&self) -> bool {
        !self.in_flight && self.snapshot.is_loading()
    }

    /// Apply a snapshot fetched by the poll loop. Ignored while a local
    /// request is in flight, since that request's answer is newer.
    pub fn apply_polled_snapshot(&mut self, snapshot: ComicSnapshot) {
        if !self.in_flight {
            self.apply_snapshot(snapshot);
        }
    }

    /// Record a request that failed without any snapshot.
    ///
    /// A local `Generating` phase set by `begin_*` is rolled back to `Failed`
    /// so the forms come back.
    pub fn apply_failure(&mut self, message: String) {
        self.in_flight = false;
        if self.snapshot.phase == Phase::Generating {
            self.snapshot.phase = Phase::Failed;
        }
        self.network_error = Some(message);
    }
}
