//! Persistence implementations

pub mod call_repository;
pub mod contact_repository;
pub mod database;
pub mod localmail_repository;
pub mod message_repository;
pub mod note_repository;
pub mod schema;
pub mod session_repository;
pub mod user_repository;
pub mod voice_room_repository;

pub use call_repository::PgCallRepository;
pub use contact_repository::PgContactRepository;
pub use database::{create_pool, DatabaseConfig};
pub use localmail_repository::PgLocalMailRepository;
pub use message_repository::PgMessageRepository;
pub use note_repository::PgNoteRepository;
pub use schema::ensure_schema;
pub use session_repository::PgSessionRepository;
pub use user_repository::PgUserRepository;
pub use voice_room_repository::PgVoiceRoomRepository;

use crate::domain::shared::error::DomainError;
use tracing::error;

/// Map a store failure to a generic domain error; the detail is logged,
/// never returned to the caller.
pub(crate) fn db_err(context: &str, e: sqlx::Error) -> DomainError {
    error!("{}: {}", context, e);
    DomainError::Internal(format!("{}: {}", context, e))
}
