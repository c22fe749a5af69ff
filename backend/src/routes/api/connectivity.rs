use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Response},
    Extension,
};

use crate::{types::AppError, upstream::UpstreamApi};

/// `WordPress` REST API discovery document
pub const DISCOVERY_PATH: &str = "/wp-json/";

/// Reachability probe for the upstream CMS. Relays the discovery document.
///
/// # Errors
///
/// Returns a 500 with `{ "error": ... }` when the upstream cannot be reached
/// or does not answer with JSON
pub async fn handler(
    Extension(upstream): Extension<Arc<dyn UpstreamApi>>,
) -> Result<Response, AppError> {
    let raw = upstream
        .call_raw(DISCOVERY_PATH, Method::GET, None)
        .await
        .map_err(|err| AppError::internal("upstream_test_failed", err.to_string()))?;

    Ok(([(CONTENT_TYPE, "application/json")], raw).into_response())
}
