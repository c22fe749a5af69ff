use std::sync::Arc;

use axum::{Extension, Json};
use common_types::{PaymentIntentRequest, PaymentIntentResponse};
use tracing::instrument;

use crate::{
    payments::PaymentProvider,
    types::{AppError, JsonPayload},
};

/// Creates a USD payment intent and hands its client secret to the browser.
///
/// The amount is passed through as is; the provider enforces its own bounds.
///
/// # Errors
///
/// Any failure, including an unparseable body, is a 500 with `{ "error": ... }`
#[instrument(skip_all)]
pub async fn create_payment_intent(
    Extension(provider): Extension<Arc<dyn PaymentProvider>>,
    JsonPayload(request): JsonPayload<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    tracing::info!(amount = request.amount, "Creating payment intent");
    let intent = provider.create_payment_intent(request.amount).await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
