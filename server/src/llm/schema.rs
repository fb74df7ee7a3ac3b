//! Response schemas for structured Gemini output.
//!
//! Gemini accepts an OpenAPI-style subset with upper-case type names.

use serde_json::{Value, json};

/// Array of `{scene_description, text}` panel scripts, both fields required.
#[must_use]
pub fn panel_script_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "scene_description": {
                    "type": "STRING",
                    "description": "A detailed visual description of the scene for the illustrator."
                },
                "text": {
                    "type": "STRING",
                    "description": "The narration or dialogue text for the panel."
                }
            },
            "required": ["scene_description", "text"]
        }
    })
}
