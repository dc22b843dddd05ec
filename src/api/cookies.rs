//! Session cookie transport

use axum::http::{HeaderMap, HeaderValue, header};

use crate::error::{AppError, Result};

/// Read the session token from the `Cookie` headers, if present and non-empty.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(cookie_name: &str, token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        cookie_name, token
    ))
    .map_err(|e| AppError::Internal(format!("invalid session cookie: {}", e)))
}
