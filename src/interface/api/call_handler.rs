//! Call signaling API handlers
//!
//! Both parties learn of state changes by re-polling the current-call
//! endpoint; there is no push channel, so notification latency is the
//! client's poll interval plus one round trip.

use super::auth::AuthUser;
use super::error::ApiError;
use super::metrics_handler::{record_call_initiated, record_call_transition};
use super::user_handler::AppState;
use crate::domain::call::{Call, CallStatus};
use crate::domain::user::UserSummary;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

/// Request to start a call
#[derive(Debug, Deserialize)]
pub struct InitiateCallRequest {
    pub callee_id: String,
}

/// Request to move a call to a new status. The status arrives as a
/// plain string so that unknown values surface as a 400 rather than a
/// body-decode rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateCallRequest {
    pub status: String,
}

/// Start ringing a callee.
///
/// No check is made for an in-flight call on either side; two users
/// dialing each other at once create two independent ringing rows.
pub async fn initiate_call(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InitiateCallRequest>,
) -> Result<(StatusCode, Json<Call>), ApiError> {
    if req.callee_id.is_empty() {
        return Err(ApiError::BadRequest("A callee is required.".to_string()));
    }
    if req.callee_id == auth.user_id {
        return Err(ApiError::BadRequest("Cannot call yourself.".to_string()));
    }

    info!("API: {} calling {}", auth.user_id, req.callee_id);

    if state.users.find_by_id(&req.callee_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "User {} not found",
            req.callee_id
        )));
    }

    let call = state.calls.create(&auth.user_id, &req.callee_id).await?;
    record_call_initiated();

    Ok((StatusCode::CREATED, Json(call)))
}

/// The caller's current call: the most recent non-terminal call
/// involving them, or `null`. This is the endpoint both parties poll.
pub async fn current_call(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Option<Call>>, ApiError> {
    let call = state.calls.current_for_user(&auth.user_id).await?;
    Ok(Json(call))
}

/// Move a call along the signaling state machine.
pub async fn update_call(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCallRequest>,
) -> Result<Json<Call>, ApiError> {
    let new_status = CallStatus::parse(&req.status)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown call status: {}", req.status)))?;

    info!("API: {} setting call {} to {}", auth.user_id, id, req.status);

    let mut call = state
        .calls
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Call {} not found", id)))?;

    if !call.involves(&auth.user_id) {
        // A party check, not an ACL: outsiders see the same not-found
        // as a call that never existed.
        return Err(ApiError::NotFound(format!("Call {} not found", id)));
    }

    call.transition(new_status)?;
    state.calls.update(&call).await?;
    record_call_transition(new_status.as_str());

    Ok(Json(call))
}

/// Directory of callable peers (everyone but the caller).
pub async fn list_peers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let peers = state.users.list_peers(&auth.user_id).await?;
    Ok(Json(peers))
}
