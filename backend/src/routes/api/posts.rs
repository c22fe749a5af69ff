use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use common_types::{PageMetadata, PostSummary};
use tracing::instrument;

use crate::{
    metadata,
    types::AppError,
    upstream::UpstreamApi,
    wordpress::{self, PostQuery},
};

/// Lists posts from `WordPress`
///
/// # Errors
///
/// Returns a 502 if `WordPress` is unreachable or answers with garbage
#[instrument(skip(upstream))]
pub async fn list_posts(
    Extension(upstream): Extension<Arc<dyn UpstreamApi>>,
    Query(query): Query<PostQuery>,
) -> Result<Json<Vec<PostSummary>>, AppError> {
    let posts = wordpress::list_posts(upstream.as_ref(), &query).await?;
    Ok(Json(posts))
}

/// Fetches a single post by slug
///
/// # Errors
///
/// - 404 when no post has this slug
/// - 502 if `WordPress` is unreachable or answers with garbage
#[instrument(skip(upstream))]
pub async fn get_post(
    Extension(upstream): Extension<Arc<dyn UpstreamApi>>,
    Path(slug): Path<String>,
) -> Result<Json<PostSummary>, AppError> {
    wordpress::fetch_post_by_slug(upstream.as_ref(), &slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::new(StatusCode::NOT_FOUND, "post_not_found", "Post not found"))
}

/// Page metadata for a post. Always 200; unknown posts get the fallback title.
#[instrument(skip(upstream))]
pub async fn get_post_metadata(
    Extension(upstream): Extension<Arc<dyn UpstreamApi>>,
    Path(slug): Path<String>,
) -> Json<PageMetadata> {
    Json(metadata::build_page_metadata(upstream.as_ref(), &slug).await)
}
