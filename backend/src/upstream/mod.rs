//! HTTP client for the upstream `WordPress` REST API.
//!
//! Every call resolves a path against the configured base URL, sends an
//! optional JSON body and hands back the response body. There is no retry
//! and no caching; the only timeout is the optional one from configuration.

mod error;

use std::time::Duration;

use axum::{
    body::Bytes,
    http::{header, Method},
};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::IgnoredAny;
use serde_json::Value;

pub use error::UpstreamError;

/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Trait for the upstream CMS API
#[async_trait::async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Sends a request and returns the raw response body, whatever the status.
    async fn send(
        &self,
        path: &str,
        method: Method,
        body: Option<Bytes>,
    ) -> Result<Bytes, UpstreamError>;

    /// Like [`UpstreamApi::send`] but fails with `Malformed` unless the body is
    /// JSON. The bytes are returned untouched so callers can relay them as is.
    async fn call_raw(
        &self,
        path: &str,
        method: Method,
        body: Option<Bytes>,
    ) -> Result<Bytes, UpstreamError> {
        let raw = self.send(path, method, body).await?;
        serde_json::from_slice::<IgnoredAny>(&raw)?;
        Ok(raw)
    }

    /// Sends a request and parses the response body as JSON
    async fn call(
        &self,
        path: &str,
        method: Method,
        body: Option<Bytes>,
    ) -> Result<Value, UpstreamError> {
        let raw = self.send(path, method, body).await?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

pub struct WordPressClient {
    base_url: String,
    http_client: ClientWithMiddleware,
}

impl WordPressClient {
    /// Creates a new client for the `WordPress` installation at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .user_agent(format!("reader-backend/{}", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = ClientBuilder::new(builder.build()?)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl UpstreamApi for WordPressClient {
    async fn send(
        &self,
        path: &str,
        method: Method,
        body: Option<Bytes>,
    ) -> Result<Bytes, UpstreamError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, %url, "Calling upstream");

        let mut request = self
            .http_client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        tracing::debug!(status = %response.status(), "Upstream responded");

        Ok(response.bytes().await?)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use axum::{body::Bytes, http::Method};

    use super::{UpstreamApi, UpstreamError};

    /// Canned reply for a path
    #[derive(Clone)]
    pub enum MockReply {
        Body(Bytes),
        Unreachable,
    }

    /// A request seen by [`MockUpstream`]
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: Method,
        pub path: String,
        pub body: Option<Bytes>,
    }

    /// In-memory upstream keyed by path (query string ignored).
    /// Unknown paths behave like an unreachable host.
    #[derive(Default)]
    pub struct MockUpstream {
        replies: HashMap<String, MockReply>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockUpstream {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn with_body(mut self, path: &str, body: impl Into<Bytes>) -> Self {
            self.replies
                .insert(path.to_string(), MockReply::Body(body.into()));
            self
        }

        #[must_use]
        pub fn with_json(self, path: &str, body: &serde_json::Value) -> Self {
            self.with_body(path, body.to_string())
        }

        #[must_use]
        pub fn with_unreachable(mut self, path: &str) -> Self {
            self.replies.insert(path.to_string(), MockReply::Unreachable);
            self
        }

        /// Requests received so far, oldest first
        ///
        /// # Panics
        ///
        /// Panics if the request log mutex is poisoned
        #[must_use]
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl UpstreamApi for MockUpstream {
        async fn send(
            &self,
            path: &str,
            method: Method,
            body: Option<Bytes>,
        ) -> Result<Bytes, UpstreamError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.to_string(),
                body,
            });

            let key = path.split('?').next().unwrap_or(path);
            match self.replies.get(key) {
                Some(MockReply::Body(body)) => Ok(body.clone()),
                Some(MockReply::Unreachable) | None => Err(UpstreamError::Unreachable(
                    reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                        "connection refused: {key}"
                    )),
                )),
            }
        }
    }
}
