//! HTTP Basic authentication for the gated analytics routes
//!
//! The server holds one static credential pair from configuration. The
//! middleware parses the `Authorization: Basic` header, decodes the
//! `user:password` pair, and compares it against the configured values.
//! Comparison goes through SHA-256 digests of both sides so it does not
//! short-circuit on the first differing byte.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::config::AuthConfig;

/// The static credential pair the gated routes are checked against
#[derive(Debug, Clone)]
pub struct AuthCredentials {
    username: String,
    password: String,
}

impl AuthCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }

    /// Check a presented credential pair
    pub fn matches(&self, username: &str, password: &str) -> bool {
        digest_eq(&self.username, username) & digest_eq(&self.password, password)
    }
}

fn digest_eq(expected: &str, presented: &str) -> bool {
    Sha256::digest(expected.as_bytes()) == Sha256::digest(presented.as_bytes())
}

/// Errors produced by the Basic auth middleware
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header is not Basic")]
    NotBasic,

    #[error("Malformed Basic credentials")]
    Malformed,

    #[error("Invalid username or password")]
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("UNAUTHORIZED", self.to_string());
        let mut response = (StatusCode::UNAUTHORIZED, Json(error)).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        response
    }
}

/// Axum middleware enforcing Basic auth against the configured credentials
pub async fn require_basic_auth(
    State(credentials): State<Arc<AuthCredentials>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingHeader)?;

    let (username, password) = decode_basic(header_value)?;

    if !credentials.matches(&username, &password) {
        tracing::debug!(username = %username, "Rejected Basic auth attempt");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(next.run(request).await)
}

fn decode_basic(header_value: &str) -> Result<(String, String), AuthError> {
    let encoded = header_value
        .strip_prefix("Basic ")
        .ok_or(AuthError::NotBasic)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Malformed)?;

    let (username, password) = decoded.split_once(':').ok_or(AuthError::Malformed)?;
    Ok((username.to_string(), password.to_string()))
}
