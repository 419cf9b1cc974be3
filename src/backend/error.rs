//! Typed errors for the backend contract
//!
//! Every failure here is recoverable: the session layer logs it and falls
//! back to the local simulation instead of surfacing a hard error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connection refused, timeout, bad status)
    #[cfg(not(target_arch = "wasm32"))]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    /// Payload parsed but broke a board invariant
    #[error("board payload failed validation")]
    InvalidBoard,

    /// Payload was not the expected JSON shape
    #[error("malformed payload: {0}")]
    Payload(String),

    /// Roll requested while no spin is available
    #[error("roll requested while no spin is available")]
    Refused,
}
