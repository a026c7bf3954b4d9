//! JSON API for saved profiles.
//!
//! Serves the normalized profile for `GET /api/profile/{identifier}` and
//! `GET /u/{identifier}.json`, including the list of defaults that were
//! filled in while reading the stored payload.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use linkbio_core::{AppliedDefault, ProfileRecord};

use crate::error::ApiError;
use crate::resolve;
use crate::state::AppState;

/// JSON representation of a saved profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileJson {
    /// Identifier the profile is stored under.
    pub unique_id: String,
    /// Canonical page URL.
    pub url: String,
    /// Normalized profile record.
    pub profile: ProfileRecord,
    /// Defaults applied during normalization.
    pub defaults: Vec<AppliedDefault>,
}

/// Handle `GET /api/profile/{identifier}`.
pub async fn json_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response, ApiError> {
    json_handler_inner(&state, identifier.trim()).await
}

/// Shared implementation for both JSON routes.
pub(crate) async fn json_handler_inner(
    state: &AppState,
    identifier: &str,
) -> Result<Response, ApiError> {
    let normalized = resolve::resolve(state.store.as_ref(), identifier)
        .await?
        .ok_or_else(|| ApiError::NotFound(identifier.to_string()))?;

    let body = ProfileJson {
        unique_id: identifier.to_string(),
        url: format!("{}/u/{identifier}", state.config.base_url),
        profile: normalized.record,
        defaults: normalized.defaults,
    };

    let mut response = Json(body).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=300, s-maxage=86400"),
    );

    Ok(response)
}
