//! LLM configuration parsed from environment variables.

use super::types::LlmError;

/// Accepted API key variables, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LLM_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_output_tokens: u32,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY` or `API_KEY` (first non-empty one wins)
    ///
    /// Optional:
    /// - `LLM_MODEL`: default `gemini-2.5-flash`
    /// - `GEMINI_BASE_URL`: default Gemini v1beta endpoint
    /// - `LLM_MAX_OUTPUT_TOKENS`: default 8192
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = resolve_api_key(API_KEY_VARS.iter().map(|var| std::env::var(var).ok()))?;

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());
        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let max_output_tokens = env_parse_strict("LLM_MAX_OUTPUT_TOKENS", DEFAULT_LLM_MAX_OUTPUT_TOKENS)?;
        let timeouts = LlmTimeouts {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, base_url, max_output_tokens, timeouts })
    }
}

/// Pick the first non-blank key from candidates listed in [`API_KEY_VARS`] order.
fn resolve_api_key(candidates: impl IntoIterator<Item = Option<String>>) -> Result<String, LlmError> {
    candidates
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_owned())
        .find(|key| !key.is_empty())
        .ok_or_else(|| LlmError::MissingApiKey { vars: API_KEY_VARS.join(", ") })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_parse_strict(key: &str, default: u32) -> Result<u32, LlmError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|_| LlmError::ConfigParse(format!("{key} must be a positive integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
