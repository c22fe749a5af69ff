pub mod api;
mod docs;
mod health;
mod pages;

use aide::axum::{routing::get, ApiRouter};

/// Creates the router with all handler routes
pub fn handler(login_path: &str) -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .merge(api::handler())
        .merge(pages::handler(login_path))
}
