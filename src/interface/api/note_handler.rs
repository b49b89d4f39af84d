//! Notepad API handlers

use super::auth::AuthUser;
use super::error::ApiError;
use super::user_handler::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteBody {
    pub content: String,
}

/// The caller's notepad; a user who never saved gets an empty pad.
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<NoteBody>, ApiError> {
    let content = state.notes.get(&auth.user_id).await?.unwrap_or_default();
    Ok(Json(NoteBody { content }))
}

/// Replace the caller's notepad. Last write wins; saving an empty
/// string is a valid way to clear the pad.
pub async fn save_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NoteBody>,
) -> Result<Json<NoteBody>, ApiError> {
    state.notes.save(&auth.user_id, &body.content).await?;
    Ok(Json(body))
}
