//! Per-user notepad

use crate::domain::shared::result::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// The user's note content; `None` when never saved.
    async fn get(&self, user_id: &str) -> Result<Option<String>>;

    /// Single-row upsert of the user's note.
    async fn save(&self, user_id: &str, content: &str) -> Result<()>;
}
