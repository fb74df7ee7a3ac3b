//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the comic REST endpoints; the wire types themselves live in
//! the shared `comic` crate.

pub mod api;
