//! API utilities for frontend-backend communication
//!
//! URL construction and the CSRF token lookup shared by every request.

use wasm_bindgen::JsCast;

use crate::shared::config::config;

/// Base URL for API requests.
///
/// Uses `api.base_url` from the config; when it is empty the backend is
/// assumed to live on the same origin as the page.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/api/clientes/{}/", api_base(), id);
/// ```
pub fn api_base() -> String {
    let configured = config().api.base_url.trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path starting with `/api/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// CSRF token from the configured cookie, or the hidden form input rendered by the server.
pub fn csrf_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let cookie_name = &config().api.csrf_cookie;

    let from_cookie = document
        .dyn_ref::<web_sys::HtmlDocument>()
        .and_then(|doc| doc.cookie().ok())
        .and_then(|cookies| cookie_value(&cookies, cookie_name));
    if from_cookie.is_some() {
        return from_cookie;
    }

    document
        .query_selector("input[name=csrfmiddlewaretoken]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .filter(|value| !value.is_empty())
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Opens `path` (relative to the API base) in a new browser window.
pub fn open_in_new_window(path: &str) {
    let url = api_url(path);
    let opened = web_sys::window().and_then(|w| w.open_with_url_and_target(&url, "_blank").ok().flatten());
    if opened.is_none() {
        log::warn!("could not open {}", url);
    }
}

/// Blocking browser alert for errors that have no inline place to go.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
