//! Page metadata (title, description, Open Graph) built from a post.

use std::sync::LazyLock;

use common_types::{OpenGraph, PageMetadata, PostSummary};
use regex::Regex;

use crate::{upstream::UpstreamApi, wordpress};

/// Suffix appended to every post title
pub const SITE_NAME: &str = "Modern Blog Reader";

/// Title used when the post cannot be loaded
pub const NOT_FOUND_TITLE: &str = "Post Not Found";

/// Title used when `WordPress` sends a post without one
pub const UNTITLED_POST: &str = "Untitled Post";

/// Longest description search engines reliably display
pub const MAX_DESCRIPTION_CHARS: usize = 160;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("Invalid regex"));

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("Invalid regex"));

/// Turns a rendered excerpt into plain text of at most 160 characters.
///
/// Tags are dropped, `&nbsp;` becomes a space and stray angle brackets are
/// removed, so the result never contains `<` or `>`. Runs of spaces collapse
/// to one and surrounding whitespace is trimmed. Truncation counts
/// characters, never splitting one.
#[must_use]
pub fn sanitize_excerpt(html: &str) -> String {
    let text = HTML_TAG
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace(['<', '>'], "");
    let collapsed = SPACE_RUN.replace_all(&text, " ");
    let trimmed = collapsed.trim();

    match trimmed.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => trimmed[..cut].trim_end().to_string(),
        None => trimmed.to_string(),
    }
}

/// Metadata for a post that was loaded successfully
#[must_use]
pub fn page_metadata_for(post: &PostSummary) -> PageMetadata {
    let title = if post.title.trim().is_empty() {
        UNTITLED_POST
    } else {
        post.title.trim()
    };
    let description = sanitize_excerpt(&post.excerpt_html);

    PageMetadata {
        title: format!("{title} | {SITE_NAME}"),
        description: Some(description.clone()),
        open_graph: Some(OpenGraph {
            title: title.to_string(),
            description,
            images: post.featured_image_url.iter().cloned().collect(),
        }),
    }
}

/// Metadata rendered when the post is missing or the lookup failed
#[must_use]
pub fn not_found_metadata() -> PageMetadata {
    PageMetadata {
        title: NOT_FOUND_TITLE.to_string(),
        description: None,
        open_graph: None,
    }
}

/// Builds the page metadata for `slug`. Never fails: any lookup error
/// degrades to [`not_found_metadata`].
pub async fn build_page_metadata(upstream: &dyn UpstreamApi, slug: &str) -> PageMetadata {
    match wordpress::fetch_post_by_slug(upstream, slug).await {
        Ok(Some(post)) => page_metadata_for(&post),
        Ok(None) => {
            tracing::debug!(slug, "No post found for metadata");
            not_found_metadata()
        }
        Err(err) => {
            tracing::warn!(slug, "Falling back to default metadata: {err}");
            not_found_metadata()
        }
    }
}
