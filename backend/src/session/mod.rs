//! Read-only access to the `WordPress`-backed session.
//!
//! The session is issued elsewhere; this side only decodes it. A token is
//! taken from the `session_token` cookie, or from an `Authorization: Bearer`
//! header when no cookie is present.

pub mod error;
pub mod token;

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};
use chrono::Utc;
use common_types::SessionClaims;

/// Cookie holding the session token
pub const SESSION_COOKIE: &str = "session_token";

/// Trait for resolving the session of an incoming request
#[async_trait::async_trait]
pub trait SessionResolver: Send + Sync {
    /// Returns the claims of the current session, or `None` when there is no
    /// usable session.
    async fn resolve(&self, headers: &HeaderMap) -> Option<SessionClaims>;
}

/// Resolves sessions from HS256-signed tokens
pub struct TokenSessionResolver {
    secret: Vec<u8>,
}

impl TokenSessionResolver {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait::async_trait]
impl SessionResolver for TokenSessionResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        let token = session_token(headers)?;

        match token::verify(token, &self.secret, Utc::now().timestamp()) {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::debug!("Ignoring session token: {err}");
                None
            }
        }
    }
}

/// Extracts the raw session token from the request headers
fn session_token(headers: &HeaderMap) -> Option<&str> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim());

    from_cookie
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|header| header.to_str().ok())
                .and_then(|header| header.strip_prefix("Bearer "))
                .map(str::trim)
        })
        .filter(|token| !token.is_empty())
}
