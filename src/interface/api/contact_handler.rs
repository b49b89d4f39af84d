//! Contact book API handlers

use super::auth::AuthUser;
use super::error::ApiError;
use super::user_handler::AppState;
use crate::domain::contact::{Contact, ContactData};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

/// List the caller's contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.contacts.list(&auth.user_id).await?;
    Ok(Json(contacts))
}

/// Add a contact
pub async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(data): Json<ContactData>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    if data.name.is_empty() {
        return Err(ApiError::BadRequest("A name is required.".to_string()));
    }

    info!("API: {} adding contact {}", auth.user_id, data.name);

    let contact = state.contacts.create(&auth.user_id, data).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Update a contact. Ownership is enforced in the query itself, so a
/// foreign contact id looks identical to a nonexistent one.
pub async fn update_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(data): Json<ContactData>,
) -> Result<Json<Contact>, ApiError> {
    if data.name.is_empty() {
        return Err(ApiError::BadRequest("A name is required.".to_string()));
    }

    let contact = state
        .contacts
        .update(&auth.user_id, id, data)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Contact {} not found", id)))?;

    Ok(Json(contact))
}

/// Delete a contact (idempotent)
pub async fn delete_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    info!("API: {} deleting contact {}", auth.user_id, id);
    state.contacts.delete(&auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
