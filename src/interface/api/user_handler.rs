//! User API handlers

use super::auth::AuthUser;
use super::error::ApiError;
use super::metrics_handler::record_login;
use super::user_dto::{
    CreateUserRequest, LoginRequest, LoginResponse, SetPasswordRequest, UpdateUserRequest,
};
use crate::domain::assistant::AssistantClient;
use crate::domain::call::CallRepository;
use crate::domain::contact::ContactRepository;
use crate::domain::localmail::LocalMailRepository;
use crate::domain::message::MessageRepository;
use crate::domain::note::NoteRepository;
use crate::domain::session::SessionRepository;
use crate::domain::user::{User, UserRepository};
use crate::domain::voice_room::VoiceRoomRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::info;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub calls: Arc<dyn CallRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub voice_rooms: Arc<dyn VoiceRoomRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub localmail: Arc<dyn LocalMailRepository>,
    /// `None` when no backend API key is configured.
    pub assistant: Option<Arc<dyn AssistantClient>>,
}

/// Authenticate a user and mint a session
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required.".to_string(),
        ));
    }

    info!("API: Login attempt for {}", req.username);

    let user = state
        .users
        .verify_credentials(&req.username, &req.password)
        .await?;

    let Some(user) = user else {
        record_login(false);
        info!("API: Login rejected for {}", req.username);
        return Err(ApiError::Unauthorized);
    };

    let session = state.sessions.create(&user.id).await?;
    record_login(true);
    info!("API: Login succeeded for {}", user.id);

    Ok(Json(LoginResponse {
        token: session.token,
        user,
    }))
}

/// Revoke the caller's session
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<StatusCode, ApiError> {
    info!("API: Logout for {}", auth.user_id);
    state.sessions.delete(auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<User>>, ApiError> {
    info!("API: Listing users");
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    info!("API: Creating user {}", req.user_data.username);
    let user = state.users.create(req.user_data, &req.password).await?;
    info!("API: Created user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace a user's profile
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    info!("API: Updating user {}", id);
    let user = state.users.update(&id, req.user_data).await?;
    Ok(Json(user))
}

/// Reset a user's password
pub async fn set_password(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<SetPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("Password is required.".to_string()));
    }

    info!("API: Resetting password for {}", id);
    state.users.set_password(&id, &req.password).await?;
    Ok(Json(serde_json::json!({ "message": "Password updated." })))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("API: Deleting user {}", id);
    state.users.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
