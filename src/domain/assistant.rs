//! AI assistant proxy

use crate::domain::shared::result::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Who authored a prior conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnSender {
    User,
    Assistant,
}

/// One prior turn of an assistant conversation, replayed on every
/// request since the proxy itself is stateless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: TurnSender,
    pub text: String,
}

/// Client for the external generative-text backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Forward a prompt plus prior turns and return the generated text.
    async fn generate(&self, prompt: &str, history: &[ChatTurn]) -> Result<String>;
}
