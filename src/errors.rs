//! Typed errors for the taskdeck client.
//!
//! `ApiError` covers everything that can go wrong talking to the backend.
//! The variants matter to callers: `Unauthorized` triggers the uniform
//! forced-logout path no matter which operation produced it, while every
//! other variant is surfaced to the user and otherwise ignored.

use serde::Deserialize;
use thiserror::Error;

/// Errors from backend API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered 401 — the session cookie is missing or expired.
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// A non-2xx answer other than 401, carrying the backend's message when
    /// the body had one.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Transport failure or undecodable response body.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Error body shape used by the backend: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build the error for a non-success, non-401 response.
    ///
    /// Extracts the backend's `message` field when the body parses as JSON,
    /// falling back to a generic status line otherwise.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Server { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
