//! URL helpers for backend calls

use super::config::config;

/// Base URL for API requests
///
/// Uses `api.base_url` from the config when set. Otherwise derives it from
/// the current window location with port 3000, e.g. `http://localhost:3000`.
/// Empty string if window is not available.
pub fn api_base() -> String {
    let configured = config().api.base_url.trim();
    if !configured.is_empty() {
        return configured.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Full API URL for a path like `/leads/import`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
