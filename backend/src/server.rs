use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{Extension, Router};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;

use crate::{
    payments::PaymentProvider, routes, session::SessionResolver, types::Environment,
    upstream::UpstreamApi,
};

/// Builds the application router with its dependencies attached as extensions
pub fn router(
    environment: Environment,
    upstream: Arc<dyn UpstreamApi>,
    payments: Arc<dyn PaymentProvider>,
    sessions: Arc<dyn SessionResolver>,
) -> Router {
    let mut openapi = OpenApi::default();

    routes::handler(&environment.login_path())
        .finish_api(&mut openapi)
        .layer(Extension(Arc::new(openapi)))
        .layer(Extension(environment))
        .layer(Extension(upstream))
        .layer(Extension(payments))
        .layer(Extension(sessions))
        .layer(TraceLayer::new_for_http())
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    upstream: Arc<dyn UpstreamApi>,
    payments: Arc<dyn PaymentProvider>,
    sessions: Arc<dyn SessionResolver>,
) -> anyhow::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], environment.port()?));
    let router = router(environment, upstream, payments, sessions);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Modern Blog Reader backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!("Failed to install Ctrl+C handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!("Failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
