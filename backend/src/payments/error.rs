//! Payment provider error types

use thiserror::Error;

/// Errors that can occur while creating a payment intent
#[derive(Error, Debug)]
pub enum PaymentError {
    /// No secret key configured for the provider
    #[error("Payment provider is not configured")]
    MissingSecretKey,

    /// Network failure talking to the provider
    #[error("Payment provider unreachable: {0}")]
    Unreachable(#[from] reqwest_middleware::Error),

    /// The provider refused the request (bad amount, bad key, ...)
    #[error("{message}")]
    Rejected {
        /// HTTP status returned by the provider
        status: u16,
        /// Provider supplied explanation
        message: String,
    },

    /// The provider answered with an unexpected body
    #[error("Payment provider returned a malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable(reqwest_middleware::Error::from(err))
    }
}
