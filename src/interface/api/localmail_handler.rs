//! Local-mail API handlers

use super::auth::AuthUser;
use super::error::ApiError;
use super::user_handler::AppState;
use crate::domain::localmail::{recipient_local_part, LocalMail};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct MailboxQuery {
    /// `sent` for the outbox; anything else (or absent) is the inbox.
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMailRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// The caller's inbox or sent mail, newest first.
pub async fn mailbox(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MailboxQuery>,
) -> Result<Json<Vec<LocalMail>>, ApiError> {
    let mail = if query.view.as_deref() == Some("sent") {
        state.localmail.sent(&auth.user_id).await?
    } else {
        state.localmail.inbox(&auth.user_id).await?
    };
    Ok(Json(mail))
}

/// Send mail to one or more portal users. Addresses are reduced to
/// their local part; unknown recipients are dropped silently.
pub async fn send_mail(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMailRequest>,
) -> Result<StatusCode, ApiError> {
    if req.to.is_empty() || req.subject.is_empty() || req.body.is_empty() {
        return Err(ApiError::BadRequest(
            "Recipients, subject and body are required.".to_string(),
        ));
    }

    let recipients: Vec<String> = req
        .to
        .iter()
        .map(|address| recipient_local_part(address).to_string())
        .collect();

    info!(
        "API: Local mail from {} to {} recipients",
        auth.user_id,
        recipients.len()
    );

    state
        .localmail
        .send(&auth.user_id, &recipients, &req.subject, &req.body)
        .await?;

    Ok(StatusCode::CREATED)
}
