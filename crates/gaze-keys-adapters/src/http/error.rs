//! Mapping of failures to HTTP responses.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gaze_keys_core::{ErrorKind, GazeError};
use tokio::task::JoinError;
use tracing::{error, warn};

use super::types::ErrorBody;

/// A failed request: status, failure class and a client-safe detail.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: ErrorKind,
    detail: String,
}

impl ApiError {
    /// A malformed request that never reached the pipeline.
    pub fn validation(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            kind: ErrorKind::ValidationError,
            detail: detail.into(),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: ErrorKind::InternalError,
            detail: "internal server error".into(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<GazeError> for ApiError {
    fn from(err: GazeError) -> Self {
        let status = if err.is_client_fault() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::validation(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::validation(err.status(), err.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        error!("Inference task did not complete: {err}");
        Self::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.kind.is_client_fault() {
            warn!(kind = self.kind.as_str(), status = %self.status, "{}", self.detail);
        } else {
            error!(kind = self.kind.as_str(), status = %self.status, "{}", self.detail);
        }

        let body = ErrorBody {
            kind: self.kind,
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaze_error_statuses() {
        let cases = [
            (GazeError::ModelUnavailable, StatusCode::INTERNAL_SERVER_ERROR),
            (GazeError::InvalidImage("bad".into()), StatusCode::BAD_REQUEST),
            (
                GazeError::MappingOutOfRange { x: 1.0, y: 0.0 },
                StatusCode::BAD_REQUEST,
            ),
            (GazeError::Inference("oops".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            let kind = err.kind();
            let api = ApiError::from(err);
            assert_eq!(api.status(), expected);
            assert_eq!(api.kind(), kind);
        }
    }

    #[test]
    fn test_model_unavailable_detail() {
        let api = ApiError::from(GazeError::ModelUnavailable);
        assert_eq!(api.detail, "Eye-tracking model not loaded");
    }

    #[test]
    fn test_internal_hides_cause() {
        let api = ApiError::internal();
        assert_eq!(api.kind(), ErrorKind::InternalError);
        assert_eq!(api.detail, "internal server error");
    }
}
