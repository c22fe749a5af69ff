use std::sync::Arc;

use axum::{http::HeaderMap, Extension, Json};
use common_types::SessionView;

use crate::session::SessionResolver;

/// What the caller's session resolves to. Never fails; a missing or
/// invalid token is simply unauthenticated.
pub async fn current_session(
    Extension(resolver): Extension<Arc<dyn SessionResolver>>,
    headers: HeaderMap,
) -> Json<SessionView> {
    let claims = resolver.resolve(&headers).await;

    Json(SessionView {
        authenticated: claims.is_some(),
        role: claims.and_then(|claims| claims.role()),
    })
}
