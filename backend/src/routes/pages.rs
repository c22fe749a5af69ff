//! Role-gated pages. Rendering happens in the front end; these routes only
//! decide whether the visitor may see the page.

use aide::axum::{routing::get, ApiRouter};
use axum::{middleware, Json};
use common_types::{PageView, Role};

use crate::middleware::{access_guard, AccessPolicy, AuthorizedSession};

/// Creates the gated page routes. Turned-away visitors go to `login_path`.
pub fn handler(login_path: &str) -> ApiRouter {
    let author_pages = ApiRouter::new()
        .api_route("/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(
            AccessPolicy::new([Role::Author], login_path),
            access_guard,
        ));

    let course_pages = ApiRouter::new()
        .api_route("/courses", get(courses))
        .route_layer(middleware::from_fn_with_state(
            AccessPolicy::new([Role::Author, Role::Student], login_path),
            access_guard,
        ));

    author_pages.merge(course_pages)
}

async fn dashboard(session: AuthorizedSession) -> Json<PageView> {
    Json(PageView {
        page: "dashboard".to_string(),
        role: session.role,
    })
}

async fn courses(session: AuthorizedSession) -> Json<PageView> {
    Json(PageView {
        page: "courses".to_string(),
        role: session.role,
    })
}
