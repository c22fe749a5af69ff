//! Compact HS256 JWS decoding for session tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use common_types::SessionClaims;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::error::SessionError;

type HmacSha256 = Hmac<Sha256>;

pub const ALG_HS256: &str = "HS256";
pub const TYP_JWT: &str = "JWT";

#[derive(Debug, Serialize, Deserialize)]
pub struct JwsHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

/// A token split into its decoded parts, not yet verified
#[derive(Debug)]
pub struct JwsTokenParts {
    pub header: JwsHeader,
    pub claims: SessionClaims,
    /// `base64url(header).base64url(payload)` exactly as received
    pub signing_input: String,
    pub signature: Vec<u8>,
}

impl TryFrom<&str> for JwsTokenParts {
    type Error = SessionError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(SessionError::MalformedToken("expected three segments"));
        };

        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(SessionError::MalformedToken("empty segment"));
        }

        Ok(Self {
            header: serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header)?)?,
            claims: serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload)?)?,
            signing_input: format!("{header}.{payload}"),
            signature: URL_SAFE_NO_PAD.decode(signature)?,
        })
    }
}

/// Decodes `token`, checks its HMAC-SHA256 signature against `secret` and
/// rejects it if `exp` is not after `now` (Unix seconds).
///
/// # Errors
///
/// Returns a [`SessionError`] describing why the token was refused
pub fn verify(token: &str, secret: &[u8], now: i64) -> Result<SessionClaims, SessionError> {
    let parts = JwsTokenParts::try_from(token)?;

    if parts.header.alg != ALG_HS256 {
        return Err(SessionError::UnsupportedAlgorithm(parts.header.alg));
    }

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SessionError::InvalidSignature)?;
    mac.update(parts.signing_input.as_bytes());
    mac.verify_slice(&parts.signature)
        .map_err(|_| SessionError::InvalidSignature)?;

    if parts.claims.exp.is_some_and(|exp| exp <= now) {
        return Err(SessionError::Expired);
    }

    Ok(parts.claims)
}

/// Signs `claims` into a compact token the way the session provider does
///
/// # Panics
///
/// Panics if the claims cannot be serialized
#[cfg(any(test, feature = "test-utils"))]
#[must_use]
pub fn sign(claims: &SessionClaims, secret: &[u8]) -> String {
    let header = JwsHeader {
        alg: ALG_HS256.to_string(),
        typ: Some(TYP_JWT.to_string()),
    };
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap()),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap())
    );

    let mut mac = HmacSha256::new_from_slice(secret).unwrap();
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{signing_input}.{signature}")
}
