//! Upstream client error types

use thiserror::Error;

/// Errors that can occur while talking to the upstream CMS
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Network failure, refused connection, or an interrupted body
    #[error("Upstream unreachable: {0}")]
    Unreachable(#[from] reqwest_middleware::Error),

    /// The upstream answered with something that is not JSON
    #[error("Upstream returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable(reqwest_middleware::Error::from(err))
    }
}
