//! Gemini REST client.
//!
//! Thin HTTP wrapper for `models/{model}:generateContent` (structured JSON
//! text) and `models/{model}:predict` (Imagen image synthesis). Pure parsing
//! in `parse_generate_response` / `parse_predict_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::LlmTimeouts;
use super::types::{GenerateResponse, LlmError};

const JSON_MIME_TYPE: &str = "application/json";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// Request a schema-constrained JSON answer for a single user prompt.
    pub async fn generate_json(
        &self,
        model: &str,
        max_output_tokens: u32,
        prompt: &str,
        response_schema: &serde_json::Value,
    ) -> Result<GenerateResponse, LlmError> {
        let body = GenerateRequest {
            contents: vec![Content { role: "user", parts: vec![Part { text: prompt }] }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema,
                max_output_tokens,
            },
        };

        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let text = self.post_json(&url, &body).await?;
        parse_generate_response(&text, model)
    }

    /// Generate one square PNG and return it as a `data:` URL.
    pub async fn predict_image(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let body = PredictRequest {
            instances: vec![PredictInstance { prompt }],
            parameters: PredictParameters { sample_count: 1, aspect_ratio: "1:1", output_mime_type: "image/png" },
        };

        let url = format!("{}/models/{model}:predict", self.base_url);
        let text = self.post_json(&url, &body).await?;
        parse_predict_response(&text)
    }

    async fn post_json(&self, url: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if !(200..300).contains(&status) {
            debug!(status, body = %text, "gemini: non-success response");
            return Err(LlmError::ApiResponse { status, body: text });
        }

        Ok(text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: PredictParameters<'a>,
}

#[derive(Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u32,
    aspect_ratio: &'a str,
    output_mime_type: &'a str,
}

#[derive(Deserialize)]
struct PredictApiResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_generate_response(json: &str, requested_model: &str) -> Result<GenerateResponse, LlmError> {
    let api: GenerateApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(candidate) = api.candidates.into_iter().next() else {
        return Err(LlmError::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let (input_tokens, output_tokens) = api
        .usage_metadata
        .map_or((0, 0), |u| (u.prompt_token_count, u.candidates_token_count));

    Ok(GenerateResponse {
        text,
        model: api.model_version.unwrap_or_else(|| requested_model.to_owned()),
        finish_reason: candidate.finish_reason,
        input_tokens,
        output_tokens,
    })
}

fn parse_predict_response(json: &str) -> Result<String, LlmError> {
    let api: PredictApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    api.predictions
        .into_iter()
        .find_map(|p| {
            let bytes = p.bytes_base64_encoded.filter(|b| !b.is_empty())?;
            let mime = p.mime_type.unwrap_or_else(|| "image/png".to_owned());
            Some(format!("data:{mime};base64,{bytes}"))
        })
        .ok_or(LlmError::EmptyResponse)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
