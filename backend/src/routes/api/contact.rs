use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Response},
    Extension, Json,
};
use common_types::UpstreamResponse;
use serde::de::IgnoredAny;
use tracing::instrument;

use crate::upstream::UpstreamApi;

/// Contact form endpoint of the `WordPress` contact plugin
pub const CONTACT_SUBMIT_PATH: &str = "/wp-json/contact/v1/submit";

/// Forwards a contact form submission to `WordPress`.
///
/// The upstream JSON body is relayed byte for byte. Every failure (invalid
/// JSON from the browser, unreachable or malformed upstream) is reported as
/// `{ "success": false, "message": ... }` with a 200 status, so clients must
/// look at `success` rather than the HTTP status.
#[instrument(skip_all)]
pub async fn submit(
    Extension(upstream): Extension<Arc<dyn UpstreamApi>>,
    body: Bytes,
) -> Response {
    if let Err(err) = serde_json::from_slice::<IgnoredAny>(&body) {
        tracing::warn!("Rejected contact submission: {err}");
        return Json(UpstreamResponse::failure(err.to_string())).into_response();
    }

    match upstream
        .call_raw(CONTACT_SUBMIT_PATH, Method::POST, Some(body))
        .await
    {
        Ok(raw) => {
            tracing::info!("Contact submission forwarded");
            ([(CONTENT_TYPE, "application/json")], raw).into_response()
        }
        Err(err) => {
            tracing::error!("Contact submission failed: {err}");
            Json(UpstreamResponse::failure(err.to_string())).into_response()
        }
    }
}
