//! User API DTOs (Data Transfer Objects)

use crate::domain::user::{CreateUser, UpdateUser, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the session token plus the profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub user: User,
}

/// Create user request; profile data plus the initial password.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub user_data: CreateUser,
    pub password: String,
}

/// Full-row update request
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(flatten)]
    pub user_data: UpdateUser,
}

/// Password reset request
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}
