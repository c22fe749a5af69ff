mod connectivity;
mod contact;
mod payments;
mod posts;
mod session;

use aide::axum::{routing::get as api_get, routing::post as api_post, ApiRouter};
use axum::routing::{get, post};

pub use connectivity::DISCOVERY_PATH;
pub use contact::CONTACT_SUBMIT_PATH;

/// Creates the router for everything under `/api`
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        // Raw relays: the response body is whatever `WordPress` sent
        .route("/api/contact", post(contact::submit))
        .route("/api/test", get(connectivity::handler))
        .route("/api/session", get(session::current_session))
        .api_route(
            "/api/create-payment-intent",
            api_post(payments::create_payment_intent),
        )
        .api_route("/api/posts", api_get(posts::list_posts))
        .api_route("/api/posts/{slug}", api_get(posts::get_post))
        .api_route(
            "/api/posts/{slug}/metadata",
            api_get(posts::get_post_metadata),
        )
}
