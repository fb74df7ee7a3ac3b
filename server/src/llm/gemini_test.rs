use super::*;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 80, "totalTokenCount": 200 },
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

// =============================================================================
// parse_generate_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "[{\"scene_description\":\"a\",\"text\":\"b\"}]" }]));
    let resp = parse_generate_response(&json, "requested").unwrap();
    assert!(resp.text.starts_with('['));
    assert_eq!(resp.model, "gemini-2.5-flash");
    assert_eq!(resp.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(resp.input_tokens, 120);
    assert_eq!(resp.output_tokens, 80);
}

#[test]
fn parse_concatenates_multiple_parts() {
    let json = make_response(serde_json::json!([{ "text": "[1," }, { "text": "2]" }]));
    let resp = parse_generate_response(&json, "requested").unwrap();
    assert_eq!(resp.text, "[1,2]");
}

#[test]
fn parse_falls_back_to_requested_model() {
    let json = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
    })
    .to_string();
    let resp = parse_generate_response(&json, "gemini-test").unwrap();
    assert_eq!(resp.model, "gemini-test");
    assert_eq!(resp.input_tokens, 0);
    assert!(resp.finish_reason.is_none());
}

#[test]
fn parse_no_candidates_is_empty_response() {
    let json = serde_json::json!({ "candidates": [] }).to_string();
    let err = parse_generate_response(&json, "m").unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[test]
fn parse_blocked_candidate_without_content_is_empty_response() {
    let json = serde_json::json!({ "candidates": [{ "finishReason": "SAFETY" }] }).to_string();
    let err = parse_generate_response(&json, "m").unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[test]
fn parse_invalid_json() {
    let err = parse_generate_response("not json", "m").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

// =============================================================================
// parse_predict_response
// =============================================================================

#[test]
fn parse_predict_builds_data_url() {
    let json = serde_json::json!({
        "predictions": [{ "bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png" }]
    })
    .to_string();
    let url = parse_predict_response(&json).unwrap();
    assert_eq!(url, "data:image/png;base64,iVBORw0KGgo=");
}

#[test]
fn parse_predict_defaults_mime_type() {
    let json = serde_json::json!({ "predictions": [{ "bytesBase64Encoded": "AAAA" }] }).to_string();
    let url = parse_predict_response(&json).unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
}

#[test]
fn parse_predict_without_images_is_empty_response() {
    let json = serde_json::json!({ "predictions": [] }).to_string();
    assert!(matches!(parse_predict_response(&json).unwrap_err(), LlmError::EmptyResponse));

    let json = serde_json::json!({}).to_string();
    assert!(matches!(parse_predict_response(&json).unwrap_err(), LlmError::EmptyResponse));
}

// =============================================================================
// Request wire shape
// =============================================================================

#[test]
fn generate_request_uses_camel_case_generation_config() {
    let schema = serde_json::json!({ "type": "ARRAY" });
    let body = GenerateRequest {
        contents: vec![Content { role: "user", parts: vec![Part { text: "hello" }] }],
        generation_config: GenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: &schema,
            max_output_tokens: 256,
        },
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(json["generationConfig"]["responseSchema"]["type"], "ARRAY");
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
}
