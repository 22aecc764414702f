//! Errors returned by the HTTP handlers.
use crate::ooxml::OoxmlError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing form field `{0}`")]
    MissingField(&'static str),

    #[error("invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("text_map must be a JSON object mapping strings to strings: {0}")]
    InvalidTextMap(#[source] serde_json::Error),

    #[error("text_map holds text that cannot be written to a Word document: {0}")]
    InvalidReplacement(#[source] OoxmlError),

    #[error("uploaded file is not a readable Word document: {0}")]
    InvalidDocument(#[source] OoxmlError),

    #[error("failed to write the edited document: {0}")]
    Serialize(#[source] OoxmlError),

    #[error("document worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Convert an ApiError to an HTTP StatusCode.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidDocument(e) if e.is_too_large() => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MissingField(_)
            | ApiError::InvalidTextMap(_)
            | ApiError::InvalidReplacement(_)
            | ApiError::InvalidDocument(_) => StatusCode::BAD_REQUEST,
            // 400 for malformed bodies, 413 when the upload limit is hit
            ApiError::Multipart(e) => e.status(),
            ApiError::Serialize(_) | ApiError::Worker(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
