use std::sync::Arc;

use aide::OperationIo;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use common_types::{Role, SessionClaims};

use crate::{session::SessionResolver, types::AppError};

/// Where the current session stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Resolution has not finished yet
    Loading,
    Unauthenticated,
    Authenticated(SessionClaims),
}

impl From<Option<SessionClaims>> for SessionStatus {
    fn from(claims: Option<SessionClaims>) -> Self {
        claims.map_or(Self::Unauthenticated, Self::Authenticated)
    }
}

/// Outcome of evaluating an [`AccessPolicy`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Session still loading, nothing is rendered yet
    Pending,
    /// The claimed role is allowed
    Authorized { role: Role },
    /// Send the visitor to this location
    Redirecting(String),
}

/// Roles allowed on a group of routes and where everyone else goes
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    allowed: Vec<Role>,
    redirect_to: String,
}

impl AccessPolicy {
    #[must_use]
    pub fn new(allowed: impl Into<Vec<Role>>, redirect_to: impl Into<String>) -> Self {
        Self {
            allowed: allowed.into(),
            redirect_to: redirect_to.into(),
        }
    }

    /// Missing sessions and disallowed roles both redirect.
    #[must_use]
    pub fn evaluate(&self, status: &SessionStatus) -> GuardState {
        match status {
            SessionStatus::Loading => GuardState::Pending,
            SessionStatus::Authenticated(claims) => match claims.role() {
                Some(role) if self.allowed.contains(&role) => GuardState::Authorized { role },
                _ => GuardState::Redirecting(self.redirect_to.clone()),
            },
            SessionStatus::Unauthenticated => GuardState::Redirecting(self.redirect_to.clone()),
        }
    }
}

/// Session that passed the access guard, available to guarded handlers
#[derive(Debug, Clone, OperationIo)]
pub struct AuthorizedSession {
    pub role: Role,
    pub claims: SessionClaims,
}

impl<S> FromRequestParts<S> for AuthorizedSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            AppError::new(
                StatusCode::UNAUTHORIZED,
                "missing_session",
                "Route is not behind the access guard",
            )
        })
    }
}

/// Role-based access middleware
///
/// Resolves the session once per request, then either runs the inner
/// handler with an [`AuthorizedSession`] in the request extensions or
/// answers with a redirect to the policy's fallback location.
pub async fn access_guard(
    State(policy): State<AccessPolicy>,
    Extension(resolver): Extension<Arc<dyn SessionResolver>>,
    mut request: Request,
    next: Next,
) -> Response {
    let status = SessionStatus::from(resolver.resolve(request.headers()).await);

    match (policy.evaluate(&status), status) {
        (GuardState::Authorized { role }, SessionStatus::Authenticated(claims)) => {
            request
                .extensions_mut()
                .insert(AuthorizedSession { role, claims });
            next.run(request).await
        }
        (GuardState::Redirecting(location), _) => {
            tracing::info!(path = %request.uri().path(), %location, "Access denied, redirecting");
            Redirect::to(&location).into_response()
        }
        // Resolution is awaited above, so a pending state renders nothing
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}
