//! Browser-persisted comic session id.
//!
//! The server keys sessions by a UUID the browser picks. Keeping it in
//! `localStorage` lets a reload pick up the comic in progress. SSR paths
//! never touch storage and always mint a fresh id.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use uuid::Uuid;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "comic_studio_session_id";

/// Parse a stored session id, rejecting anything that is not a UUID.
pub fn parse_session_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Load the stored session id, creating and storing a new one if absent.
pub fn load_or_create_session_id() -> Uuid {
    if let Some(id) = load_session_id() {
        return id;
    }
    let id = Uuid::new_v4();
    save_session_id(id);
    id
}

fn load_session_id() -> Option<Uuid> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(STORAGE_KEY).ok().flatten()?;
        parse_session_id(&raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

fn save_session_id(id: Uuid) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let _ = storage.set_item(STORAGE_KEY, &id.to_string());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}
