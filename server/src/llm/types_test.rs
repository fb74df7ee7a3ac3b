use super::*;

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    let err = LlmError::ApiRequest("conn refused".into());
    assert!(err.retryable());
}

#[test]
fn retryable_api_response_429() {
    let err = LlmError::ApiResponse { status: 429, body: "rate limited".into() };
    assert!(err.retryable());
}

#[test]
fn retryable_api_response_503() {
    let err = LlmError::ApiResponse { status: 503, body: "unavailable".into() };
    assert!(err.retryable());
}

#[test]
fn not_retryable_api_response_400() {
    let err = LlmError::ApiResponse { status: 400, body: "bad request".into() };
    assert!(!err.retryable());
}

#[test]
fn not_retryable_api_response_403() {
    let err = LlmError::ApiResponse { status: 403, body: "key rejected".into() };
    assert!(!err.retryable());
}

#[test]
fn not_retryable_empty_response() {
    assert!(!LlmError::EmptyResponse.retryable());
}

#[test]
fn not_retryable_missing_api_key() {
    let err = LlmError::MissingApiKey { vars: "GEMINI_API_KEY, API_KEY".into() };
    assert!(!err.retryable());
}

// =============================================================================
// LlmError Display
// =============================================================================

#[test]
fn display_missing_api_key_names_vars() {
    let err = LlmError::MissingApiKey { vars: "GEMINI_API_KEY, API_KEY".into() };
    let msg = err.to_string();
    assert!(msg.contains("GEMINI_API_KEY"));
    assert!(msg.contains("API_KEY"));
}

#[test]
fn display_api_response_includes_status_not_body() {
    let err = LlmError::ApiResponse { status: 500, body: "secret internals".into() };
    let msg = err.to_string();
    assert!(msg.contains("500"));
    assert!(!msg.contains("secret internals"));
}

#[test]
fn display_config_parse() {
    let err = LlmError::ConfigParse("bad config".into());
    assert!(err.to_string().contains("bad config"));
}
