//! REST API helpers for the comic endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! The server answers every comic endpoint with a snapshot, including on
//! 4xx/5xx, so a decodable body wins over the status code. Only transport
//! failures and undecodable bodies become `Err` strings.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use comic::{ComicSnapshot, ContinueRequest, GenerateRequest};
use uuid::Uuid;

#[cfg(any(test, feature = "hydrate"))]
fn comic_endpoint(session_id: Uuid) -> String {
    format!("/api/comic/{session_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn generate_endpoint(session_id: Uuid) -> String {
    format!("/api/comic/{session_id}/generate")
}

#[cfg(any(test, feature = "hydrate"))]
fn continue_endpoint(session_id: Uuid) -> String {
    format!("/api/comic/{session_id}/continue")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(action: &str, status: u16) -> String {
    format!("{action} request failed: {status}")
}

/// Fetch the session's current snapshot via `GET /api/comic/{id}`.
///
/// # Errors
///
/// Returns an error string if the request or decoding fails.
pub async fn fetch_comic(session_id: Uuid) -> Result<ComicSnapshot, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&comic_endpoint(session_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        decode_snapshot(resp, "fetch").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session_id;
        Err("not available on server".to_owned())
    }
}

/// Start a new comic via `POST /api/comic/{id}/generate`.
///
/// # Errors
///
/// Returns an error string if the request or decoding fails.
pub async fn generate_comic(session_id: Uuid, body: &GenerateRequest) -> Result<ComicSnapshot, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&generate_endpoint(session_id))
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        decode_snapshot(resp, "generate").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session_id, body);
        Err("not available on server".to_owned())
    }
}

/// Append the next page via `POST /api/comic/{id}/continue`.
///
/// # Errors
///
/// Returns an error string if the request or decoding fails.
pub async fn continue_comic(session_id: Uuid, body: &ContinueRequest) -> Result<ComicSnapshot, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&continue_endpoint(session_id))
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        decode_snapshot(resp, "continue").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (session_id, body);
        Err("not available on server".to_owned())
    }
}

/// Discard the session's comic via `DELETE /api/comic/{id}`.
///
/// # Errors
///
/// Returns an error string if the request or decoding fails.
pub async fn reset_comic(session_id: Uuid) -> Result<ComicSnapshot, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&comic_endpoint(session_id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        decode_snapshot(resp, "reset").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session_id;
        Err("not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
async fn decode_snapshot(resp: gloo_net::http::Response, action: &str) -> Result<ComicSnapshot, String> {
    let status = resp.status();
    match resp.json::<ComicSnapshot>().await {
        Ok(snapshot) => {
            if !(200..300).contains(&status) {
                log::warn!("{action} answered {status}: {:?}", snapshot.error);
            }
            Ok(snapshot)
        }
        Err(_) if !(200..300).contains(&status) => Err(request_failed_message(action, status)),
        Err(e) => Err(e.to_string()),
    }
}
