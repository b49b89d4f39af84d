//! Request authentication
//!
//! Every authenticated route extracts [`AuthUser`], which resolves the
//! `x-session-token` header against the session store. Handlers only
//! ever see a verified user ID.

use super::error::ApiError;
use super::user_handler::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

pub const SESSION_HEADER: &str = "x-session-token";

/// The authenticated caller's identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub token: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = Uuid::parse_str(token).map_err(|_| ApiError::Unauthorized)?;

        let session = state
            .sessions
            .find_valid(token)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::Unauthorized)?;

        Ok(AuthUser {
            user_id: session.user_id,
            token: session.token,
        })
    }
}
