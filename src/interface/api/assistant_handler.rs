//! AI assistant proxy handler
//!
//! The portal holds the backend API key; browsers never see it. The
//! proxy is stateless, so the client resends the whole conversation
//! with every prompt.

use super::auth::AuthUser;
use super::error::ApiError;
use super::metrics_handler::record_assistant_request;
use super::user_handler::AppState;
use crate::domain::assistant::ChatTurn;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct AssistantChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantChatResponse {
    pub reply: String,
}

/// Relay a prompt to the generative backend.
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AssistantChatRequest>,
) -> Result<Json<AssistantChatResponse>, ApiError> {
    if req.prompt.is_empty() {
        return Err(ApiError::BadRequest("A prompt is required.".to_string()));
    }

    let Some(assistant) = &state.assistant else {
        return Err(ApiError::Unavailable(
            "The AI assistant is not configured.".to_string(),
        ));
    };

    info!(
        "API: Assistant prompt from {} ({} prior turns)",
        auth.user_id,
        req.history.len()
    );

    match assistant.generate(&req.prompt, &req.history).await {
        Ok(reply) => {
            record_assistant_request(true);
            Ok(Json(AssistantChatResponse { reply }))
        }
        Err(e) => {
            record_assistant_request(false);
            warn!("Assistant request failed: {}", e);
            Err(ApiError::AssistantFailed)
        }
    }
}
