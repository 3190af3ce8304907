//! Domain-error to HTTP mapping and the JSON response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use domains::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Wraps `DomainError` so handlers can use `?` straight through to a
/// JSON error response.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            DomainError::Validation(msg) | DomainError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            DomainError::Internal(msg) => {
                error!(%msg, "internal error reached the API boundary");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
            }
        };
        let body = Json(Failure { success: false, message });
        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct Failure {
    success: bool,
    message: String,
}

/// Success envelope: `{"success":true,"data":...}` with an optional
/// human-readable message.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope { success: true, message: None, data })
}

pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: Some(message.into()),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_map_to_bad_request() {
        let response =
            ApiError::from(DomainError::Conflict("already".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_hide_their_detail() {
        let response =
            ApiError::from(DomainError::Internal("db exploded".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
