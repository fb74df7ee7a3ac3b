use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("API_KEY");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("GEMINI_BASE_URL");
        std::env::remove_var("LLM_MAX_OUTPUT_TOKENS");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn resolve_api_key_prefers_first_variable() {
    let key = resolve_api_key([Some("gemini".to_owned()), Some("fallback".to_owned())]).unwrap();
    assert_eq!(key, "gemini");
}

#[test]
fn resolve_api_key_falls_back_to_second_variable() {
    let key = resolve_api_key([None, Some("fallback".to_owned())]).unwrap();
    assert_eq!(key, "fallback");
}

#[test]
fn resolve_api_key_skips_blank_values() {
    let key = resolve_api_key([Some("   ".to_owned()), Some("fallback".to_owned())]).unwrap();
    assert_eq!(key, "fallback");
}

#[test]
fn resolve_api_key_missing_names_both_vars() {
    let err = resolve_api_key([None, None]).unwrap_err();
    assert!(matches!(&err, LlmError::MissingApiKey { vars } if vars == "GEMINI_API_KEY, API_KEY"));
}

#[test]
fn from_env_defaults() {
    unsafe {
        clear_llm_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_LLM_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(cfg.max_output_tokens, DEFAULT_LLM_MAX_OUTPUT_TOKENS);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_uses_api_key_when_gemini_key_absent() {
    unsafe {
        clear_llm_env();
        std::env::set_var("API_KEY", "generic");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "generic");

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_overrides() {
    unsafe {
        clear_llm_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
        std::env::set_var("LLM_MODEL", "gemini-2.5-pro");
        std::env::set_var("GEMINI_BASE_URL", "https://example.test/v1beta/");
        std::env::set_var("LLM_MAX_OUTPUT_TOKENS", "2048");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.model, "gemini-2.5-pro");
    assert_eq!(cfg.base_url, "https://example.test/v1beta");
    assert_eq!(cfg.max_output_tokens, 2048);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_key_errors() {
    unsafe { clear_llm_env() };

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { .. }));
}

#[test]
fn from_env_bad_max_tokens_errors() {
    unsafe {
        clear_llm_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
        std::env::set_var("LLM_MAX_OUTPUT_TOKENS", "lots");
    }

    let err = LlmConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("LLM_MAX_OUTPUT_TOKENS"));

    unsafe { clear_llm_env() };
}
