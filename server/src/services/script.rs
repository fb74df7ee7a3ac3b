//! Script generator: story + character → panel scripts.
//!
//! DESIGN
//! ======
//! Composes one natural-language instruction from the user's inputs, asks
//! the model for a JSON array constrained by `panel_script_schema`, and
//! parses the answer. A batch is all-or-nothing: any malformed or empty
//! answer fails the whole call, and nothing is retried.

use comic::ComicPanelScript;
use tracing::{info, warn};

use crate::llm::LlmGenerate;
use crate::llm::schema::panel_script_schema;
use crate::llm::types::LlmError;

/// Panels requested per batch. The model is asked for this many but shorter
/// non-empty answers are accepted.
pub const PANELS_PER_BATCH: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("response is not a JSON array")]
    NotAnArray,
    #[error("panel {index} is malformed: {reason}")]
    MalformedPanel { index: usize, reason: String },
    #[error("response contained no panels")]
    Empty,
}

// =============================================================================
// PROMPTS
// =============================================================================

#[must_use]
pub fn build_script_prompt(story_prompt: &str, character_prompt: &str) -> String {
    format!(
        "You are a master comic book writer.\n\
         Based on the following story idea and character description, create a {PANELS_PER_BATCH}-panel comic script.\n\
         Each panel must have a \"scene_description\" for the illustrator and \"text\" for the narration or dialogue.\n\
         The \"scene_description\" should be detailed and visually descriptive.\n\
         The \"text\" should be concise and impactful, like in a real comic book.\n\
         Ensure the story flows logically across the {PANELS_PER_BATCH} panels.\n\
         \n\
         Story Idea: \"{story_prompt}\"\n\
         Main Character: \"{character_prompt}\"\n\
         \n\
         Return the result as a JSON array."
    )
}

#[must_use]
pub fn build_continuation_prompt(
    story_prompt: &str,
    character_prompt: &str,
    existing_script: &[ComicPanelScript],
    next_story_part: &str,
) -> String {
    let history = serde_json::to_string(existing_script).unwrap_or_else(|_| "[]".to_owned());
    format!(
        "You are a master comic book writer continuing a story.\n\
         The original story idea was: \"{story_prompt}\"\n\
         The main character is: \"{character_prompt}\"\n\
         Here is the script for the panels so far: {history}\n\
         The user wants the next part of the story to be about: \"{next_story_part}\"\n\
         \n\
         Based on all this context, create the next {PANELS_PER_BATCH}-panel comic script. \
         Maintain the story's tone and continuity.\n\
         The character's appearance should remain consistent based on the main character description.\n\
         Each panel must have a \"scene_description\" for the illustrator and \"text\" for the narration or dialogue.\n\
         \n\
         Return the result as a JSON array of {PANELS_PER_BATCH} new panels."
    )
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse the model's answer into a non-empty list of panel scripts.
///
/// # Errors
///
/// Fails when the text is not JSON, not an array, has a panel without both
/// string fields, or is empty.
pub fn parse_script(text: &str) -> Result<Vec<ComicPanelScript>, ScriptError> {
    let value: serde_json::Value =
        serde_json::from_str(text.trim()).map_err(|e| ScriptError::InvalidJson(e.to_string()))?;

    let serde_json::Value::Array(items) = value else {
        return Err(ScriptError::NotAnArray);
    };
    if items.is_empty() {
        return Err(ScriptError::Empty);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<ComicPanelScript>(item)
                .map_err(|e| ScriptError::MalformedPanel { index, reason: e.to_string() })
        })
        .collect()
}

// =============================================================================
// GENERATION
// =============================================================================

/// Generate the opening batch of panel scripts.
///
/// # Errors
///
/// Returns a [`ScriptError`] on transport failure or an unusable answer.
pub async fn generate_script(
    llm: &dyn LlmGenerate,
    story_prompt: &str,
    character_prompt: &str,
) -> Result<Vec<ComicPanelScript>, ScriptError> {
    let prompt = build_script_prompt(story_prompt, character_prompt);
    request_script(llm, &prompt, "initial").await
}

/// Generate the next batch of panel scripts given the story so far.
///
/// # Errors
///
/// Returns a [`ScriptError`] on transport failure or an unusable answer.
pub async fn generate_continuation_script(
    llm: &dyn LlmGenerate,
    story_prompt: &str,
    character_prompt: &str,
    existing_script: &[ComicPanelScript],
    next_story_part: &str,
) -> Result<Vec<ComicPanelScript>, ScriptError> {
    let prompt = build_continuation_prompt(story_prompt, character_prompt, existing_script, next_story_part);
    request_script(llm, &prompt, "continuation").await
}

async fn request_script(
    llm: &dyn LlmGenerate,
    prompt: &str,
    kind: &'static str,
) -> Result<Vec<ComicPanelScript>, ScriptError> {
    let schema = panel_script_schema();
    let response = llm.generate_json(prompt, &schema).await.inspect_err(|e| {
        warn!(kind, error = %e, retryable = e.retryable(), "script: LLM request failed");
    })?;

    let script = parse_script(&response.text).inspect_err(|e| {
        warn!(kind, error = %e, "script: unusable model answer");
    })?;

    if script.len() != PANELS_PER_BATCH {
        info!(kind, panels = script.len(), "script: batch size differs from request");
    }
    Ok(script)
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
