use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
        Request,
    },
    response::Response,
    Router,
};
use common_types::{Role, SessionClaims, WpUserdata};
use reader_backend::{
    payments::{PaymentProvider, StripeClient},
    server,
    session::{token, SessionResolver, TokenSessionResolver, SESSION_COOKIE},
    types::Environment,
    upstream::{UpstreamApi, WordPressClient},
};
use tower::ServiceExt;

use super::fake_upstream::{offline_url, FakeUpstream, STRIPE_TEST_KEY};

pub const TEST_SESSION_SECRET: &[u8] = b"integration-test-secret";

/// Setup test environment variables and logging
pub fn setup_test_env() {
    dotenvy::from_path(".env.test").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Which `WordPress` the router under test talks to
pub enum WordPress {
    /// The fake upstream, answering normally
    Healthy,
    /// The fake upstream's `/broken` prefix, answering HTML
    Broken,
    /// A closed port
    Offline,
}

pub struct TestSetup {
    pub router: Router,
    pub upstream: FakeUpstream,
}

impl TestSetup {
    pub async fn default() -> Self {
        Self::new(WordPress::Healthy, Some(STRIPE_TEST_KEY)).await
    }

    pub async fn new(wordpress: WordPress, stripe_key: Option<&str>) -> Self {
        setup_test_env();

        let upstream = FakeUpstream::start().await;
        let wordpress_url = match wordpress {
            WordPress::Healthy => upstream.base_url.clone(),
            WordPress::Broken => format!("{}/broken", upstream.base_url),
            WordPress::Offline => offline_url().await,
        };

        let wordpress_client: Arc<dyn UpstreamApi> = Arc::new(
            WordPressClient::new(wordpress_url, None).expect("Failed to build WordPress client"),
        );
        let stripe_client: Arc<dyn PaymentProvider> = Arc::new(
            StripeClient::new(
                upstream.base_url.clone(),
                stripe_key.map(ToString::to_string),
                None,
            )
            .expect("Failed to build Stripe client"),
        );
        let sessions: Arc<dyn SessionResolver> =
            Arc::new(TokenSessionResolver::new(TEST_SESSION_SECRET));

        let router = server::router(
            Environment::Development,
            wordpress_client,
            stripe_client,
            sessions,
        );

        Self { router, upstream }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_raw_post_request(route, &payload.to_string()).await
    }

    pub async fn send_raw_post_request(
        &self,
        route: &str,
        body: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_with_bearer(
        &self,
        route: &str,
        token: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_with_cookie(
        &self,
        route: &str,
        token: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .header(COOKIE, format!("theme=dark; {SESSION_COOKIE}={token}"))
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

/// Session token for `role`, signed with the test secret
pub fn session_token(role: Option<Role>, exp: Option<i64>) -> String {
    token::sign(
        &SessionClaims {
            wp_token: Some("wp-issued-token".to_string()),
            wp_userdata: Some(WpUserdata { role }),
            exp,
        },
        TEST_SESSION_SECRET,
    )
}
