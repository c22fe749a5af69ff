//! Post queries against the `WordPress` REST API (`/wp-json/wp/v2/posts`).
//!
//! Posts are always fetched with `_embed` so the featured image arrives in
//! the same response. Nothing is cached: every call goes upstream.

use axum::http::Method;
use common_types::PostSummary;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use crate::upstream::{UpstreamApi, UpstreamError};

const POSTS_PATH: &str = "/wp-json/wp/v2/posts";

/// Largest page size `WordPress` accepts
const MAX_PER_PAGE: u32 = 100;

const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Deserialize)]
struct Rendered {
    #[serde(default)]
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct WpMedia {
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WpEmbedded {
    #[serde(default, rename = "wp:featuredmedia")]
    featured_media: Vec<WpMedia>,
}

/// Raw post as returned by `/wp/v2/posts?_embed`
#[derive(Debug, Deserialize)]
struct WpPost {
    id: u64,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    title: Option<Rendered>,
    #[serde(default)]
    excerpt: Option<Rendered>,
    #[serde(default, rename = "_embedded")]
    embedded: Option<WpEmbedded>,
}

impl From<WpPost> for PostSummary {
    fn from(post: WpPost) -> Self {
        let featured_image_url = post
            .embedded
            .and_then(|embedded| embedded.featured_media.into_iter().next())
            .and_then(|media| media.source_url)
            .filter(|url| !url.is_empty());

        Self {
            id: post.id,
            slug: post.slug,
            title: post.title.map(|title| title.rendered).unwrap_or_default(),
            excerpt_html: post
                .excerpt
                .map(|excerpt| excerpt.rendered)
                .unwrap_or_default(),
            featured_image_url,
        }
    }
}

/// Query parameters accepted by the post listing
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
pub struct PostQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Posts per page, clamped to 1..=100
    pub per_page: Option<u32>,
    /// Free-text search
    pub search: Option<String>,
}

impl PostQuery {
    fn to_query_string(&self) -> String {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);

        let mut query = format!("_embed&page={page}&per_page={per_page}");
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                query.push_str("&search=");
                query.push_str(&encode(search));
            }
        }
        query
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Fetches a single post by slug.
///
/// Returns `Ok(None)` when no post matches, including when `WordPress`
/// answers with an error object instead of a list.
///
/// # Errors
///
/// Returns an error if the upstream is unreachable or the body is not a valid post list
pub async fn fetch_post_by_slug(
    upstream: &dyn UpstreamApi,
    slug: &str,
) -> Result<Option<PostSummary>, UpstreamError> {
    let path = format!("{POSTS_PATH}?slug={}&_embed", encode(slug));

    match upstream.call(&path, Method::GET, None).await? {
        Value::Array(posts) => match posts.into_iter().next() {
            Some(post) => {
                let post: WpPost = serde_json::from_value(post)?;
                Ok(Some(post.into()))
            }
            None => Ok(None),
        },
        other => {
            tracing::warn!(slug, "Unexpected post lookup response: {other}");
            Ok(None)
        }
    }
}

/// Lists posts, newest first (the `WordPress` default ordering).
///
/// # Errors
///
/// Returns an error if the upstream is unreachable or the body is not a valid post list
pub async fn list_posts(
    upstream: &dyn UpstreamApi,
    query: &PostQuery,
) -> Result<Vec<PostSummary>, UpstreamError> {
    let path = format!("{POSTS_PATH}?{}", query.to_query_string());

    match upstream.call(&path, Method::GET, None).await? {
        value @ Value::Array(_) => {
            let posts: Vec<WpPost> = serde_json::from_value(value)?;
            Ok(posts.into_iter().map(PostSummary::from).collect())
        }
        other => {
            // Out-of-range pages come back as `rest_post_invalid_page_number`
            tracing::warn!("Unexpected post listing response: {other}");
            Ok(Vec::new())
        }
    }
}
