//! API error responses
//!
//! Detail on store and backend failures is logged where it happens; the
//! client only ever sees the generic message for 5xx responses.

use crate::domain::shared::error::DomainError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required.")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Service Unavailable: {0}")]
    Unavailable(String),

    #[error("An error occurred while contacting the AI assistant.")]
    AssistantFailed,

    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::AssistantFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthorized(_) => ApiError::Unauthorized,
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::InvalidStateTransition(msg) | DomainError::AlreadyExists(msg) => {
                ApiError::Conflict(msg)
            }
            DomainError::Unavailable(msg) => ApiError::Unavailable(msg),
            DomainError::Internal(_) => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let e: ApiError = DomainError::NotFound("User x not found".to_string()).into();
        assert_eq!(e.status(), StatusCode::NOT_FOUND);

        let e: ApiError = DomainError::InvalidStateTransition("bad".to_string()).into();
        assert_eq!(e.status(), StatusCode::CONFLICT);

        let e: ApiError = DomainError::Internal("sql blew up".to_string()).into();
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Store detail must not leak into the response body
        assert_eq!(e.to_string(), "Internal Server Error");
    }
}
