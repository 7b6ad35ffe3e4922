//! HTTP gateway to the CRM backend
//!
//! Every call attaches the stored bearer token, is aborted after
//! `api.timeout_secs` and is decoded from either a bare JSON body or a
//! `{ success, data, message }` envelope. A 401 on anything but login ends
//! the session and sends the browser to `/login`.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::{AbortController, FormData};

use super::api_utils::api_url;
use super::config::config;
use crate::system::auth::storage;

pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error, please check your connection ({0})")]
    Network(String),
    #[error("The server did not respond within {0} seconds")]
    Timeout(u32),
    #[error("Your session has expired. Please sign in again")]
    Unauthorized,
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
    #[error("Browser error: {0}")]
    Browser(String),
}

enum Payload<'a> {
    Empty,
    Json(Value),
    Form(&'a FormData),
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    execute(false, path, Payload::Empty).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let body = serde_json::to_value(body).map_err(|e| ApiError::Browser(e.to_string()))?;
    execute(true, path, Payload::Json(body)).await
}

/// POST without a body
pub async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    execute(true, path, Payload::Empty).await
}

pub async fn post_multipart<T: DeserializeOwned>(path: &str, form: &FormData) -> Result<T, ApiError> {
    execute(true, path, Payload::Form(form)).await
}

/// Build a multipart body from text parts plus an optional `file` part
pub fn form_data(file: Option<&web_sys::File>, parts: &[(&str, String)]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Browser(format!("{e:?}")))?;
    if let Some(file) = file {
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|e| ApiError::Browser(format!("{e:?}")))?;
    }
    for (name, value) in parts {
        form.append_with_str(name, value)
            .map_err(|e| ApiError::Browser(format!("{e:?}")))?;
    }
    Ok(form)
}

async fn execute<T: DeserializeOwned>(post: bool, path: &str, payload: Payload<'_>) -> Result<T, ApiError> {
    let url = api_url(path);
    let timeout_secs = config().api.timeout_secs;

    let controller = AbortController::new().map_err(|e| ApiError::Browser(format!("{e:?}")))?;
    let timed_out = Rc::new(Cell::new(false));
    let _timer = {
        let controller = controller.clone();
        let timed_out = timed_out.clone();
        Timeout::new(timeout_secs.saturating_mul(1000), move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let signal = controller.signal();
    let mut builder = if post { Request::post(&url) } else { Request::get(&url) };
    builder = builder.abort_signal(Some(&signal));
    if let Some(token) = storage::get_token() {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    let request = match payload {
        Payload::Empty => builder.build(),
        Payload::Json(body) => builder.json(&body),
        Payload::Form(form) => builder.body(form.clone()),
    }
    .map_err(|e| ApiError::Browser(e.to_string()))?;

    let aborted = |e: gloo_net::Error| {
        if timed_out.get() {
            ApiError::Timeout(timeout_secs)
        } else {
            ApiError::Network(e.to_string())
        }
    };

    let response = request.send().await.map_err(&aborted)?;
    let status = response.status();
    let text = response.text().await.map_err(&aborted)?;

    if ends_session(status, path) {
        log::warn!("{} returned 401, ending session", path);
        end_session();
        return Err(ApiError::Unauthorized);
    }

    let result = interpret(status, &text);
    if let Err(e) = &result {
        log::error!("{} {} failed: {}", if post { "POST" } else { "GET" }, path, e);
    }
    result
}

/// Clear stored credentials and reload on the login page
fn end_session() {
    storage::clear_session();
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}

/// A 401 ends the session everywhere except on the login call itself,
/// where it only means wrong credentials
fn ends_session(status: u16, path: &str) -> bool {
    status == 401 && path != LOGIN_PATH
}

/// Map a status and body to the caller's type
fn interpret<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            message: error_message(status, text),
        });
    }
    decode_body(text)
}

/// Decode a success body. The body itself is tried first, then the `data`
/// member of an envelope. An envelope with `success: false` becomes an error
/// carrying its message.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))?;

    let direct_error = match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => return Ok(decoded),
        Err(e) => e,
    };

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Http {
            status: 200,
            message: envelope_message(&value).unwrap_or_else(|| "Request failed".to_string()),
        });
    }

    match value.get("data") {
        Some(data) => serde_json::from_value(data.clone()).map_err(|e| ApiError::Decode(e.to_string())),
        None => Err(ApiError::Decode(direct_error.to_string())),
    }
}

/// Server message for a failed request: envelope `message`, then `error`,
/// then a short plain-text body, then a generic status line
fn error_message(status: u16, text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(message) = envelope_message(&value) {
            return message;
        }
    }

    let text = text.trim();
    if !text.is_empty() && text.len() <= 200 && !text.starts_with('<') && !text.starts_with('{') {
        return text.to_string();
    }
    format!("Request failed with status {}", status)
}

fn envelope_message(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}
