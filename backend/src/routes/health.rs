use aide::axum::IntoApiResponse;
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: String,
    /// Crate version of the running backend
    semver: String,
    /// `GIT_REV` baked in at build time
    rev: Option<String>,
}

/// Liveness probe for the reader backend
///
/// Answers from the process alone with the build version. `WordPress`
/// reachability is checked separately by `/api/test`.
pub async fn handler() -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
    })
}
