//! Session token error types

use thiserror::Error;

/// Reasons a session token is not accepted
#[derive(Error, Debug)]
pub enum SessionError {
    /// Token is not `header.payload.signature`
    #[error("Malformed session token: {0}")]
    MalformedToken(&'static str),

    /// A segment is not valid base64url
    #[error("Invalid base64 in session token: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Header or payload is not the expected JSON
    #[error("Invalid JSON in session token: {0}")]
    Json(#[from] serde_json::Error),

    /// Only HS256 tokens are issued for sessions
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match the configured secret
    #[error("Invalid session token signature")]
    InvalidSignature,

    /// `exp` is in the past
    #[error("Session token expired")]
    Expired,
}
