//! HTTP client for the Gemini generative-text backend

use crate::config::AssistantConfig;
use crate::domain::assistant::{AssistantClient, ChatTurn, TurnSender};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const SYSTEM_INSTRUCTION: &str = "You are Mason, a helpful assistant for LynxAI.";
const SYSTEM_INSTRUCTION_FIRST: &str =
    "You are Mason, a helpful assistant for LynxAI. Introduce yourself in this first message.";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from config; `None` when no API key is configured,
    /// in which case the assistant endpoint reports unavailable.
    pub fn from_config(config: &AssistantConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl AssistantClient for GeminiClient {
    async fn generate(&self, prompt: &str, history: &[ChatTurn]) -> Result<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: Some(
                    match turn.sender {
                        TurnSender::User => "user",
                        TurnSender::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        });

        // The assistant introduces itself only on the opening turn.
        let system_instruction = if history.is_empty() {
            SYSTEM_INSTRUCTION_FIRST
        } else {
            SYSTEM_INSTRUCTION
        };

        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
            },
            contents,
        };

        debug!("Forwarding prompt to {} ({} prior turns)", self.model, history.len());

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Assistant backend request failed: {}", e);
                DomainError::Internal(format!("Assistant backend request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Assistant backend returned {}", status);
            return Err(DomainError::Internal(format!(
                "Assistant backend returned {}",
                status
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Malformed assistant response: {}", e);
            DomainError::Internal(format!("Malformed assistant response: {}", e))
        })?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                error!("Assistant response contained no candidates");
                DomainError::Internal("Assistant response contained no candidates".to_string())
            })?;

        Ok(text)
    }
}
