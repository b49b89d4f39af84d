//! User entity

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Standard,
    Trial,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Standard => "standard",
            UserRole::Trial => "trial",
            UserRole::Guest => "guest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "standard" => Some(UserRole::Standard),
            "trial" => Some(UserRole::Trial),
            "guest" => Some(UserRole::Guest),
            _ => None,
        }
    }
}

/// Subscription plan, stored as JSONB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub cost: String,
    pub details: String,
}

/// Billing state, stored as JSONB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Billing {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owes: Option<f64>,
}

/// User profile as returned to clients; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Lowercased username doubles as the surrogate key.
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub plan: Plan,
    pub email: String,
    pub sip: String,
    pub billing: Billing,
    pub chat_enabled: bool,
    pub ai_enabled: bool,
    pub localmail_enabled: bool,
}

/// Minimal directory entry used by chat and phone peer listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

/// User creation data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub role: UserRole,
    pub plan: Plan,
    pub email: String,
    pub sip: String,
    pub billing: Billing,
    #[serde(default)]
    pub chat_enabled: bool,
    #[serde(default)]
    pub ai_enabled: bool,
    #[serde(default)]
    pub localmail_enabled: bool,
}

/// Full-row user update data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub role: UserRole,
    pub plan: Plan,
    pub email: String,
    pub sip: String,
    pub billing: Billing,
    pub chat_enabled: bool,
    pub ai_enabled: bool,
    pub localmail_enabled: bool,
}
