//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `script` and `image` wrap the two external capabilities, `pipeline` chains
//! them into panel batches, `session` is the per-comic state machine, and
//! `studio` binds sessions to shared state so route handlers stay focused on
//! protocol translation.

pub mod image;
pub mod pipeline;
pub mod script;
pub mod session;
pub mod studio;
