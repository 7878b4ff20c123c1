//! Request-framing errors for the relay API.
//!
//! Verification itself never fails; only malformed requests reach here.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing issueId or output")]
    MissingField,

    #[error("Invalid JSON body")]
    InvalidJson { detail: String },

    #[error("Not found")]
    NotFound,

    /// The body could not be read (too large, aborted stream).
    #[error("Request body rejected")]
    Body { status: StatusCode, detail: String },
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField | Self::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Body { status, .. } => *status,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let detail = match self {
            Self::InvalidJson { detail } | Self::Body { detail, .. } => Some(detail.clone()),
            _ => None,
        };
        ErrorBody {
            error: self.to_string(),
            detail,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson {
            detail: err.to_string(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Body {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingField.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidJson {
                detail: String::new()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_body_rejection_keeps_status_and_detail() {
        let err = ApiError::Body {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            detail: "length limit exceeded".into(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "Request body rejected", "detail": "length limit exceeded"})
        );
    }

    #[test]
    fn test_body_includes_detail_only_for_invalid_json() {
        let body = serde_json::to_value(ApiError::MissingField.body()).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Missing issueId or output"}));

        let err: ApiError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], "Invalid JSON body");
        assert!(body["detail"].as_str().unwrap().contains("EOF"));
    }
}
