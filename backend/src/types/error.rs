//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common_types::ErrorResponse;

use crate::{payments::PaymentError, upstream::UpstreamError};

/// Application error rendered as `{ "error": "..." }`
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    /// Machine-readable code, only used for logging
    code: &'static str,
    inner: ErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            inner: ErrorResponse {
                error: message.into(),
            },
        }
    }

    /// Catch-all 500 used by the proxy endpoints
    #[must_use]
    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.inner.error
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.code, self.inner.error),
            500..=599 => tracing::error!("Server error: {} - {}", self.code, self.inner.error),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        let code = match &err {
            UpstreamError::Unreachable(_) => "upstream_unreachable",
            UpstreamError::Malformed(_) => "upstream_malformed",
        };

        Self::new(StatusCode::BAD_GATEWAY, code, err.to_string())
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        let code = match &err {
            PaymentError::MissingSecretKey => "payment_config_error",
            PaymentError::Unreachable(_) => "payment_unreachable",
            PaymentError::Rejected { .. } => "payment_rejected",
            PaymentError::Malformed(_) => "payment_malformed",
        };

        Self::internal(code, err.to_string())
    }
}

impl OperationOutput for AppError {
    type Inner = ErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ErrorResponse>::operation_response(ctx, operation)
    }
}
