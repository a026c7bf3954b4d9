//! Route definitions for the linkbio service.
//!
//! ## Routes
//!
//! - `GET /` - Home page
//! - `GET /health` - Health check (JSON)
//! - `GET /robots.txt` - Crawler instructions
//! - `POST /api/save` - Store a profile payload, answers `{"uniqueId": ...}`
//! - `GET /api/profile/{identifier}` - Normalized profile (JSON)
//! - `GET /u/{identifier}` - Profile page (or .json for API)

mod health;
mod home;
pub mod json;
pub mod save;
mod view;

use std::any::Any;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::{ApiError, PageError, panic_message};
use crate::state::AppState;

/// Build the complete linkbio router.
pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let api = Router::new()
        .route(
            "/api/save",
            post(save::save_handler).layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .route("/api/profile/{identifier}", get(json::json_handler))
        .layer(CatchPanicLayer::custom(api_panic));

    let pages = Router::new()
        .route("/u/{identifier}", get(view::profile_handler))
        .layer(CatchPanicLayer::custom(page_panic));

    Router::new()
        .route("/", get(home::home_page))
        .route("/health", get(health::health_check))
        .route("/robots.txt", get(robots_txt))
        .merge(api)
        .merge(pages)
        .with_state(state)
}

/// Serve robots.txt allowing all crawlers.
///
/// Profile pages are meant to be shared and unfurled.
async fn robots_txt() -> impl IntoResponse {
    (
        [("content-type", "text/plain; charset=utf-8")],
        "User-agent: *\nAllow: /\nDisallow: /api/\n",
    )
}

fn api_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal(panic_message(&*payload)).into_response()
}

fn page_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    PageError::Internal(panic_message(&*payload)).into_response()
}
