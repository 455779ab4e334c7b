//! Error boundary of the HTTP layer.
//!
//! # Responsibilities
//! - Render every handler failure as one JSON shape
//! - Translate gRPC status codes into HTTP status codes
//! - Turn caught panics into 500 responses
//!
//! # Design Decisions
//! - Status mapping follows the grpc-gateway convention so clients see the
//!   same codes a generated REST proxy would produce.
//! - Backend messages are surfaced verbatim in `error`; the gateway adds
//!   only the `description` context line.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::Code;
use utoipa::ToSchema;

use crate::validation::ValidationError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// What the gateway was doing when the failure happened.
    pub description: String,
    /// Underlying error message.
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or invalid client input. Never forwarded to the backend.
    #[error("{description}: {detail}")]
    BadRequest { description: String, detail: String },

    /// The backend answered with a non-OK status.
    #[error("{description}: {status}")]
    Upstream {
        description: String,
        status: tonic::Status,
    },

    #[error("missing or invalid credentials")]
    Unauthorized,

    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(description: impl Into<String>, detail: impl ToString) -> Self {
        ApiError::BadRequest {
            description: description.into(),
            detail: detail.to_string(),
        }
    }

    pub fn upstream(description: impl Into<String>, status: tonic::Status) -> Self {
        ApiError::Upstream {
            description: description.into(),
            status,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => http_status_from_code(status.code()),
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        let status = self.status_code().as_u16();
        match self {
            ApiError::BadRequest {
                description,
                detail,
            } => ErrorResponse {
                status,
                description: description.clone(),
                error: detail.clone(),
            },
            ApiError::Upstream {
                description,
                status: rpc,
            } => ErrorResponse {
                status,
                description: description.clone(),
                error: rpc.message().to_string(),
            },
            ApiError::Unauthorized => ErrorResponse {
                status,
                description: "unauthorized".to_string(),
                error: self.to_string(),
            },
            ApiError::Internal(_) => ErrorResponse {
                status,
                description: "internal server error".to_string(),
                error: "the request could not be completed".to_string(),
            },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.description(), err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

/// HTTP status for a gRPC status code.
pub fn http_status_from_code(code: Code) -> StatusCode {
    match code {
        Code::Ok => StatusCode::OK,
        // Client Closed Request, nginx convention.
        Code::Cancelled => {
            StatusCode::from_u16(499).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Code::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::AlreadyExists => StatusCode::CONFLICT,
        Code::PermissionDenied => StatusCode::FORBIDDEN,
        Code::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
        Code::FailedPrecondition => StatusCode::BAD_REQUEST,
        Code::Aborted => StatusCode::CONFLICT,
        Code::OutOfRange => StatusCode::BAD_REQUEST,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        Code::DataLoss => StatusCode::INTERNAL_SERVER_ERROR,
        Code::Unauthenticated => StatusCode::UNAUTHORIZED,
    }
}

/// Response factory for `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "handler panicked");
    ApiError::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(http_status_from_code(Code::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            http_status_from_code(Code::InvalidArgument),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            http_status_from_code(Code::Unavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            http_status_from_code(Code::DeadlineExceeded),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(http_status_from_code(Code::Cancelled).as_u16(), 499);
        assert_eq!(
            http_status_from_code(Code::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_upstream_error_surfaces_backend_message() {
        let err = ApiError::upstream(
            "failed to delete customer",
            tonic::Status::not_found("customer 7 not found"),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["description"], "failed to delete customer");
        assert_eq!(body["error"], "customer 7 not found");
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let err: ApiError = ValidationError::Phone("abc".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["description"], "error while validating phone number");
    }

    #[tokio::test]
    async fn test_panic_payload_is_not_leaked() {
        let response = handle_panic(Box::new("secret state"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["status"], 500);
        assert!(!body["error"].as_str().unwrap().contains("secret"));
    }
}
