//! Studio service: session-keyed entry points for generation and continuation.
//!
//! DESIGN
//! ======
//! Sessions live in `AppState::sessions`. The write lock is held only to
//! `begin_*` and `finish_*` a session; the model call in between runs without
//! it, so snapshot reads stay responsive while a batch is generating.
//!
//! Each batch runs in its own spawned task that also applies the result.
//! The request only awaits that task, so a client that disconnects mid-call
//! still leaves the session `Ready` or `Failed`.
//!
//! A background sweeper drops sessions idle for longer than
//! `COMIC_SESSION_IDLE_SECS`. Sessions that are generating are never swept.

use std::time::{Duration, Instant};

use comic::ComicSnapshot;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use super::pipeline::{continue_comic_panels, generate_comic_panels};
use super::session::SessionError;
use crate::state::AppState;

const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;
const DEFAULT_SESSION_SWEEP_SECS: u64 = 300;
const BATCH_ABORTED_MESSAGE: &str = "Comic generation stopped unexpectedly. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// The request was refused before any generation started.
    #[error(transparent)]
    Rejected(#[from] SessionError),
    /// The pipeline ran and failed; the session holds the same message.
    #[error("{0}")]
    Generation(String),
}

/// Current view of a session. Unknown ids read as an empty, idle comic.
pub async fn snapshot(state: &AppState, session_id: Uuid) -> ComicSnapshot {
    let sessions = state.sessions.read().await;
    sessions
        .get(&session_id)
        .map(super::session::ComicSession::snapshot)
        .unwrap_or_default()
}

/// Generate the first page of a new comic, replacing whatever the session held.
///
/// # Errors
///
/// [`StudioError::Rejected`] for busy sessions or blank prompts;
/// [`StudioError::Generation`] when the pipeline fails.
pub async fn start_generation(
    state: &AppState,
    session_id: Uuid,
    story_prompt: &str,
    character_prompt: &str,
) -> Result<ComicSnapshot, StudioError> {
    let ticket = {
        let mut sessions = state.sessions.write().await;
        sessions
            .entry(session_id)
            .or_default()
            .begin_generation(story_prompt, character_prompt)?
    };
    info!(%session_id, story_len = ticket.story_prompt.len(), "studio: generation started");

    let task_state = state.clone();
    let batch = tokio::spawn(async move {
        let result = generate_comic_panels(
            task_state.llm.as_ref(),
            task_state.images.as_ref(),
            &ticket.story_prompt,
            &ticket.character_prompt,
        )
        .await;
        let failure = result.as_ref().err().map(|e| e.user_message().to_owned());

        let mut sessions = task_state.sessions.write().await;
        let session = sessions.entry(session_id).or_default();
        session.finish_generation(result);

        match failure {
            Some(message) => Err(StudioError::Generation(message)),
            None => {
                info!(%session_id, panels = session.panels().len(), "studio: generation complete");
                Ok(session.snapshot())
            }
        }
    });

    join_batch(state, session_id, batch).await
}

/// Append the next page to an existing comic.
///
/// A session that has no story yet is left untouched and its snapshot returned.
///
/// # Errors
///
/// [`StudioError::Rejected`] for busy or complete sessions and blank input;
/// [`StudioError::Generation`] when the pipeline fails.
pub async fn continue_generation(
    state: &AppState,
    session_id: Uuid,
    next_story_part: &str,
) -> Result<ComicSnapshot, StudioError> {
    let ticket = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.entry(session_id).or_default();
        match session.begin_continuation(next_story_part)? {
            Some(ticket) => ticket,
            None => return Ok(session.snapshot()),
        }
    };
    info!(%session_id, existing = ticket.existing_panels.len(), "studio: continuation started");

    let task_state = state.clone();
    let batch = tokio::spawn(async move {
        let result = continue_comic_panels(
            task_state.llm.as_ref(),
            task_state.images.as_ref(),
            &ticket.next_story_part,
            &ticket.character_prompt,
            &ticket.story_prompt,
            &ticket.existing_panels,
        )
        .await;
        let failure = result.as_ref().err().map(|e| e.user_message().to_owned());

        let mut sessions = task_state.sessions.write().await;
        let session = sessions.entry(session_id).or_default();
        session.finish_continuation(result);

        match failure {
            Some(message) => Err(StudioError::Generation(message)),
            None => {
                info!(%session_id, page = session.page(), "studio: continuation complete");
                Ok(session.snapshot())
            }
        }
    });

    join_batch(state, session_id, batch).await
}

/// Await a spawned batch. The batch task owns the `finish_*` call, so a
/// dropped request never leaves its session generating. A panicked task
/// settles the session as failed.
async fn join_batch(
    state: &AppState,
    session_id: Uuid,
    batch: JoinHandle<Result<ComicSnapshot, StudioError>>,
) -> Result<ComicSnapshot, StudioError> {
    match batch.await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(%session_id, error = %e, "studio: generation task aborted");
            let mut sessions = state.sessions.write().await;
            if let Some(session) = sessions.get_mut(&session_id) {
                session.abandon_batch(BATCH_ABORTED_MESSAGE);
            }
            Err(StudioError::Generation(BATCH_ABORTED_MESSAGE.to_owned()))
        }
    }
}

/// Throw the session's comic away so a new one can be started.
///
/// # Errors
///
/// [`StudioError::Rejected`] while a batch is in flight.
pub async fn reset(state: &AppState, session_id: Uuid) -> Result<ComicSnapshot, StudioError> {
    let mut sessions = state.sessions.write().await;
    if let Some(session) = sessions.get_mut(&session_id) {
        session.reset()?;
    }
    info!(%session_id, "studio: session reset");
    Ok(ComicSnapshot::default())
}

// =============================================================================
// IDLE SWEEP
// =============================================================================

/// Remove sessions idle longer than `max_idle`. Returns how many were dropped.
pub async fn sweep_idle_sessions(state: &AppState, max_idle: Duration, now: Instant) -> usize {
    let mut sessions = state.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, session| session.is_busy() || session.idle_for(now) <= max_idle);
    before - sessions.len()
}

/// Spawn the background idle-session sweeper. Returns a handle for shutdown.
pub fn spawn_session_sweeper(state: AppState) -> JoinHandle<()> {
    let max_idle = Duration::from_secs(env_parse("COMIC_SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS));
    let every = Duration::from_secs(env_parse("COMIC_SESSION_SWEEP_SECS", DEFAULT_SESSION_SWEEP_SECS));
    info!(max_idle_secs = max_idle.as_secs(), sweep_secs = every.as_secs(), "session sweeper configured");
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(every).await;
            let removed = sweep_idle_sessions(&state, max_idle, Instant::now()).await;
            if removed > 0 {
                info!(removed, "studio: swept idle sessions");
            }
        }
    })
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "studio_test.rs"]
mod tests;
