//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the comic sessions keyed by client-chosen session id, plus the
//! two generation capabilities: the LLM and the image resolver.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::llm::LlmGenerate;
use crate::services::image::ImageResolver;
use crate::services::session::ComicSession;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, ComicSession>>>,
    pub llm: Arc<dyn LlmGenerate>,
    pub images: Arc<dyn ImageResolver>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmGenerate>, images: Arc<dyn ImageResolver>) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), llm, images }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_state_has_no_sessions() {
        let state = test_helpers::test_app_state(Arc::new(test_helpers::ScriptedLlm::ok(&[])));
        assert!(state.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn clones_share_sessions() {
        let state = test_helpers::test_app_state(Arc::new(test_helpers::ScriptedLlm::ok(&[])));
        let other = state.clone();
        state.sessions.write().await.insert(Uuid::new_v4(), ComicSession::new());
        assert_eq!(other.sessions.read().await.len(), 1);
    }
}
