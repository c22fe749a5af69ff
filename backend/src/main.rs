use std::sync::Arc;

use reader_backend::{
    payments::{PaymentProvider, StripeClient},
    server,
    session::{SessionResolver, TokenSessionResolver},
    types::Environment,
    upstream::{UpstreamApi, WordPressClient},
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().as_str()));

    // JSON logs for staging/production, regular format for development
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter).init();
    } else {
        fmt().with_env_filter(env_filter).init();
    }

    let timeout = environment.upstream_timeout();
    if timeout.is_none() {
        tracing::warn!("UPSTREAM_TIMEOUT_SECS not set, upstream calls can hang indefinitely");
    }

    let upstream: Arc<dyn UpstreamApi> =
        Arc::new(WordPressClient::new(environment.wordpress_url(), timeout)?);
    let payments: Arc<dyn PaymentProvider> = Arc::new(StripeClient::new(
        environment.stripe_api_url(),
        environment.stripe_secret_key(),
        timeout,
    )?);
    let sessions: Arc<dyn SessionResolver> =
        Arc::new(TokenSessionResolver::new(environment.session_secret()));

    tracing::info!(wordpress_url = %environment.wordpress_url(), "Configured upstream");

    server::start(environment, upstream, payments, sessions).await
}
