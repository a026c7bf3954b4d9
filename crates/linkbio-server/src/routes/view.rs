//! Profile page route handler.
//!
//! Handles `GET /u/{identifier}`; a `.json` suffix answers with the
//! normalized profile instead of HTML.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::PageError;
use crate::render;
use crate::resolve;
use crate::state::{AppState, CachedHtml};

/// Browser TTL, CDN TTL and stale-while-revalidate window, in seconds.
///
/// Saved profiles never change under their identifier.
const PAGE_TTL: (u32, u32, u32) = (300, 86400, 3600);

/// Handle a profile page request.
///
/// 1. Dispatches `.json` requests to the JSON handler
/// 2. Serves a cached render when present
/// 3. Otherwise resolves, renders and caches the page
pub async fn profile_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response, PageError> {
    let identifier = identifier.trim();

    if let Some(bare) = identifier.strip_suffix(".json") {
        return Ok(super::json::json_handler_inner(&state, bare)
            .await
            .into_response());
    }

    if let Some(cached) = state.cache.get(identifier).await {
        tracing::debug!(identifier = %identifier, cached_at = %cached.cached_at, "cache hit");
        return Ok(build_response(&cached.html));
    }

    tracing::debug!(identifier = %identifier, "cache miss, resolving");

    let Some(normalized) = resolve::resolve(state.store.as_ref(), identifier).await? else {
        return Err(PageError::NotFound(identifier.to_string()));
    };

    if !normalized.defaults.is_empty() {
        tracing::debug!(
            identifier = %identifier,
            defaults = normalized.defaults.len(),
            "rendered with defaults applied"
        );
    }

    let html_string = render::render_page(&state.config, identifier, &normalized).into_string();

    let cached = CachedHtml {
        html: html_string.clone(),
        cached_at: chrono::Utc::now(),
    };
    state.cache.insert(identifier.to_string(), cached).await;

    Ok(build_response(&html_string))
}

/// Build an HTTP response with HTML content and security/cache headers.
fn build_response(html: &str) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(render::components::CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    let (max_age, s_maxage, swr) = PAGE_TTL;
    let cache_value =
        format!("public, max-age={max_age}, s-maxage={s_maxage}, stale-while-revalidate={swr}");
    if let Ok(val) = HeaderValue::from_str(&cache_value) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    (StatusCode::OK, headers, html.to_string()).into_response()
}
