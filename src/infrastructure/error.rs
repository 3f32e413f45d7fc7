//! Error types for the search access layer
//!
//! Every failure reaching the UI is collapsed into one message string by the
//! use cases; the variants here exist for logging and for tests.

use thiserror::Error;

use crate::domain::platform::UnknownPlatform;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("A valid keyword is required for search")]
    InvalidKeyword,

    #[error(transparent)]
    UnknownPlatform(#[from] UnknownPlatform),

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed with status {status}: {url}")]
    HttpStatus {
        status: u16,
        url: String,
        body: Option<String>,
    },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Client configuration error: {message}")]
    Configuration { message: String },
}

impl ApiError {
    /// True when the call was rejected locally before any request was sent
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidKeyword | Self::UnknownPlatform(_))
    }

    /// Upstream status code, if the service answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body captured with a failed status, for logging
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}
