//! Transport errors
//!
//! Non-2xx responses are not errors at this layer; callers inspect
//! [`HttpResponse::status`](crate::HttpResponse) themselves.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    /// Connect, timeout or body read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid proxy: {0}")]
    InvalidProxy(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("failed to build HTTP client: {0}")]
    Build(String),
}
