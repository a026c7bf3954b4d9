//! Error types for the linkbio service.
//!
//! The save API answers with JSON (`ApiError`); public profile pages
//! answer with HTML error pages (`PageError`).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};
use serde::Serialize;

use crate::storage::StorageError;

/// JSON API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body was empty or whitespace.
    #[error("empty payload")]
    EmptyPayload,

    /// Request body was not valid JSON.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Request body exceeded the configured limit.
    #[error("payload too large")]
    PayloadTooLarge,

    /// No profile under the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// Identifier allocation gave up.
    #[error("identifier allocation failed: {0}")]
    Allocation(#[from] linkbio_core::Error),

    /// Storage backend failure, including missing configuration.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A handler panicked.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            Self::EmptyPayload => (StatusCode::BAD_REQUEST, "empty payload", None),
            Self::MalformedPayload(msg) => (
                StatusCode::BAD_REQUEST,
                "malformed payload",
                Some(msg.clone()),
            ),
            Self::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload too large", None),
            Self::NotFound(id) => (StatusCode::NOT_FOUND, "not found", Some(id.clone())),
            Self::Allocation(err) => {
                tracing::error!(error = %err, "identifier allocation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "could not allocate identifier",
                    Some(err.to_string()),
                )
            }
            Self::Storage(err @ StorageError::NotConfigured { .. }) => {
                tracing::error!(error = %err, "storage not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage not configured",
                    Some(err.to_string()),
                )
            }
            Self::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage failure",
                    Some(err.to_string()),
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error",
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// HTML page error type.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Unknown identifier, or a stored payload that failed normalization.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage backend failure while loading the profile.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// A handler panicked.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "Page Not Found",
                "This profile does not exist, or its saved data could not be read.".to_string(),
            ),
            Self::Storage(err) => {
                tracing::error!(error = %err, "storage error while loading profile");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something Went Wrong",
                    format!("The profile could not be loaded: {err}"),
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal error while rendering profile");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something Went Wrong",
                    format!("The profile could not be displayed: {msg}"),
                )
            }
        };

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Create your own page" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}

/// Extract a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn api_error_display() {
        assert_eq!(ApiError::EmptyPayload.to_string(), "empty payload");
        assert_eq!(
            ApiError::MalformedPayload("eof".to_string()).to_string(),
            "malformed payload: eof"
        );
    }

    #[tokio::test]
    async fn empty_payload_is_bad_request() {
        let response = ApiError::EmptyPayload.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "empty payload");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn malformed_payload_has_details() {
        let response = ApiError::MalformedPayload("key must be a string".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "malformed payload");
        assert_eq!(body["details"], "key must be a string");
    }

    #[tokio::test]
    async fn not_configured_names_variable() {
        let err = ApiError::Storage(StorageError::NotConfigured {
            variable: "KV_REST_API_URL",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "storage not configured");
        assert_eq!(body["details"], "KV_REST_API_URL is not set");
    }

    #[tokio::test]
    async fn allocation_is_distinct_from_storage_failure() {
        let err = ApiError::Allocation(linkbio_core::Error::IdentifierSpaceExhausted {
            attempts: 100,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "could not allocate identifier");

        let err = ApiError::Storage(StorageError::Backend("READONLY".to_string()));
        let body = json_body(err.into_response()).await;
        assert_eq!(body["error"], "storage failure");
        assert_eq!(body["details"], "backend error: READONLY");
    }

    #[test]
    fn page_not_found_status() {
        let response = PageError::NotFound("abc123".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn page_storage_error_shows_message_and_link_back() {
        let err = PageError::Storage(StorageError::Backend("connection reset".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("connection reset"));
        assert!(html.contains(r#"href="/""#));
    }

    #[test]
    fn panic_message_variants() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
