//! Custom extractors for request parsing

use aide::operation::OperationInput;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use schemars::JsonSchema;

use crate::types::error::AppError;

/// JSON extractor whose rejection is the `{ "error": "..." }` envelope with a 500.
///
/// The payment endpoint reports every failure, including unparseable input,
/// through the same error shape and status.
pub struct JsonPayload<T>(pub T);

impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) =
            Json::<T>::from_request(req, state)
                .await
                .map_err(|err: JsonRejection| {
                    tracing::debug!("Rejected JSON payload: {err:?}");
                    AppError::internal("invalid_payload", err.body_text())
                })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for JsonPayload<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }
}
