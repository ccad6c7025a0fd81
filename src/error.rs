//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Dashboard is closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// The single human-readable line shown to the user.
    ///
    /// Structured API errors surface their `message` field; everything else
    /// collapses to the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Http(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Transport failure: connection refused, DNS, TLS, body decode.
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-2xx response carrying a structured error body.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Non-2xx response without a usable error body.
    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// Response status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Api { status, .. } | HttpError::Status { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            HttpError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
