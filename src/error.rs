//! Unified SDK error types.
//!
//! Three failure classes matter to callers: transport-level failures
//! (`Http`, retryable via a user-triggered refresh), backend rejections of a
//! mutating call (`Rejected`, surfaced verbatim, never retried by the SDK),
//! and wire decoding failures (`Decode`, a hard error — unknown statuses are
//! never silently defaulted). None are fatal to the host application.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The backend returned a failure result for a mutating call
    /// (insufficient funds, invalid state transition, concurrent
    /// modification). The message is the backend's, verbatim.
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Wire → domain decoding errors.
///
/// The backend's status strings map onto closed sum types; anything
/// unrecognized is a protocol mismatch, not a value to paper over.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unknown order status: {0:?}")]
    UnknownOrderStatus(String),

    #[error("Unknown chunk status: {0:?}")]
    UnknownChunkStatus(String),
}
