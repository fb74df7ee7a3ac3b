//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the comic studio surfaces. They take reactive props and
//! callbacks from the studio page instead of reaching into context, so each
//! one can be reused or tested on its own.

pub mod comic_display;
pub mod continue_form;
pub mod download_button;
pub mod header;
pub mod loader;
pub mod prompt_form;
