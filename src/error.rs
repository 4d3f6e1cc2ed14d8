use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while loading page data
#[derive(Error, Debug)]
pub enum LoadError {
    /// The route parameters did not contain the required key
    #[error("Missing route parameter: {0}")]
    MissingParam(String),

    /// The request could not complete (connection refused, DNS, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON
    #[error("Failed to parse response body as JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The upstream API answered with a non-success status.
    ///
    /// `payload` holds the parsed response body as-is.
    #[error("Upstream responded with {status}")]
    Upstream { status: StatusCode, payload: Value },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl LoadError {
    /// The structured body reported by the upstream, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            LoadError::Upstream { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// The HTTP status reported by the upstream, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            LoadError::Upstream { status, .. } => Some(*status),
            LoadError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
