use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Uniform envelope returned by the proxy handlers.
///
/// `success` is always present. A missing `data` means the call failed or
/// produced nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpstreamResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl UpstreamResponse {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// `{ "error": "..." }` body used by the non-envelope endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// A WordPress post reduced to the fields the site renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub excerpt_html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

/// Page metadata derived from a post. Built per request and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    /// Plain text, at most 160 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
}

/// WordPress roles the site knows how to gate on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Author,
    Student,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WpUserdata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Claims carried by the WordPress-backed session. Read-only on this side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wp_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wp_userdata: Option<WpUserdata>,
    /// Expiry as a Unix timestamp in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl SessionClaims {
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.wp_userdata.as_ref().and_then(|userdata| userdata.role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaymentIntentRequest {
    /// Amount in the smallest currency unit (cents)
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// Descriptor returned by a role-gated page once access is granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageView {
    pub page: String,
    pub role: Role,
}

/// What the current request's session resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionView {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}
