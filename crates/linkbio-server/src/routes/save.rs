//! Save endpoint.
//!
//! Handles `POST /api/save`: validates the body is JSON, allocates a fresh
//! identifier and stores the payload under it.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use linkbio_core::{MAX_ALLOCATION_ATTEMPTS, identifier};

use crate::error::ApiError;
use crate::state::AppState;
use crate::storage::ProfileStore;

/// Successful save response.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    /// Identifier the payload was stored under.
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
}

/// Handle a save request.
pub async fn save_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::MalformedPayload(rejection.body_text())
        }
    })?;

    let payload = parse_payload(&body)?;

    let unique_id = allocate_identifier(&state).await?;
    state.store.set(&unique_id, &payload).await?;

    tracing::info!(
        identifier = %unique_id,
        bytes = body.len(),
        backend = state.store.backend_name(),
        "profile saved"
    );

    Ok(Json(SaveResponse { unique_id }))
}

/// Parse a request body into a JSON value.
///
/// Any JSON document is accepted; shape checks happen when the profile is
/// viewed.
pub(crate) fn parse_payload(body: &[u8]) -> Result<Value, ApiError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ApiError::MalformedPayload(format!("body is not UTF-8: {e}")))?;

    if text.trim().is_empty() {
        return Err(ApiError::EmptyPayload);
    }

    serde_json::from_str(text).map_err(|e| ApiError::MalformedPayload(e.to_string()))
}

/// Draw identifiers until one is not yet taken.
///
/// Backends that can enumerate their keys are checked against a single
/// snapshot; the rest are probed one candidate at a time.
async fn allocate_identifier(state: &AppState) -> Result<String, ApiError> {
    let alphabet = &state.config.alphabet;
    let store: &dyn ProfileStore = state.store.as_ref();

    if let Some(existing) = store.list_ids().await? {
        let id = identifier::allocate(&existing, MAX_ALLOCATION_ATTEMPTS, || {
            identifier::generate(alphabet)
        })?;
        return Ok(id);
    }

    for (attempt, candidate) in
        identifier::candidates(MAX_ALLOCATION_ATTEMPTS, || identifier::generate(alphabet))
            .enumerate()
    {
        if !store.exists(&candidate).await? {
            return Ok(candidate);
        }
        tracing::debug!(attempt, identifier = %candidate, "identifier collision");
    }

    Err(linkbio_core::Error::IdentifierSpaceExhausted {
        attempts: MAX_ALLOCATION_ATTEMPTS,
    }
    .into())
}
