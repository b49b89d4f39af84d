//! API interface implementations

pub mod assistant_handler;
pub mod auth;
pub mod call_handler;
pub mod chat_handler;
pub mod contact_handler;
pub mod error;
pub mod localmail_handler;
pub mod metrics_handler;
pub mod note_handler;
pub mod router;
pub mod user_dto;
pub mod user_handler;
pub mod voice_room_handler;

pub use auth::AuthUser;
pub use error::ApiError;
pub use metrics_handler::init_metrics;
pub use router::build_router;
pub use user_handler::AppState;
