//! Data API Wrappers
//!
//! Frontend bindings to the REST collaborator, organized by resource.
//! One fetch helper owns the wire plumbing; resource modules stay
//! declarative.

mod folders;
mod lists;
mod sections;
mod tasks;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

// Re-export all public items
pub use folders::*;
pub use lists::*;
pub use sections::*;
pub use tasks::*;

/// Same-origin API, served by the backend alongside the frontend.
const API_BASE: &str = "/api";

/// Errors crossing the data-API seam.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, ...).
    #[error("network error: {0}")]
    Transport(String),
    /// Non-success HTTP response; local state is left unmodified.
    #[error("server error (status {status})")]
    Server { status: u16 },
    /// The response body did not match the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),
    /// Rejected before any request was dispatched.
    #[error("{0}")]
    Validation(String),
}

fn js_err(value: JsValue) -> ApiError {
    ApiError::Transport(format!("{value:?}"))
}

/// Reject unusable titles before any request leaves the client. The
/// inline forms pre-validate; this guards the remaining call paths.
fn validate_title(title: &str) -> Result<(), ApiError> {
    if crate::models::validate_title(title).is_none() {
        return Err(ApiError::Validation(format!(
            "title must be 1 to {} characters",
            crate::models::TITLE_MAX_LEN
        )));
    }
    Ok(())
}

/// Perform one request against the API and decode the JSON response.
async fn request<T: DeserializeOwned>(
    method: &str,
    path: &str,
    body: Option<String>,
) -> Result<T, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(json) = body {
        opts.set_body(&JsValue::from_str(&json));
    }

    let url = format!("{API_BASE}{path}");
    let req = Request::new_with_str_and_init(&url, &opts).map_err(js_err)?;
    req.headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let win = web_sys::window().ok_or_else(|| ApiError::Transport("no window".to_string()))?;
    let resp_value = JsFuture::from(win.fetch_with_request(&req))
        .await
        .map_err(js_err)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Transport("fetch resolved to a non-response".to_string()))?;

    if !resp.ok() {
        return Err(ApiError::Server {
            status: resp.status(),
        });
    }

    let json = JsFuture::from(resp.json().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    request("GET", path, None).await
}

async fn send<T: DeserializeOwned, B: Serialize>(
    method: &str,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let json = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    request(method, path, Some(json)).await
}

/// DELETE; the `{"deleted": true}` body is not interesting.
async fn delete(path: &str) -> Result<(), ApiError> {
    let _: serde_json::Value = request("DELETE", path, None).await?;
    Ok(())
}
