//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (localStorage, the PDF export
//! libraries) from page and component logic.

pub mod export;
pub mod session_store;
