//! Chat completion service abstraction.
//!
//! The chat policy talks to an injected [`ChatCompletion`] implementation so
//! it can be exercised with a deterministic stub. [`OpenAiChat`] is the HTTP
//! implementation and [`complete_with_retry`] layers the recovery policy on
//! top of any service.
mod openai;
mod retry;

pub use openai::{ChatConfig, OpenAiChat};
pub use retry::{RetryPolicy, complete_with_retry};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Conversation sent to the completion service.
///
/// Turns alternate user/assistant starting with a user turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: Option<String>,
    pub turns: Vec<String>,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, turns: Vec<String>) -> Self {
        let system = system.into();
        Self {
            system: (!system.is_empty()).then_some(system),
            turns,
        }
    }

    /// Wire messages: optional system message, then the alternating turns.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let system = self.system.iter().map(|content| ChatMessage {
            role: Role::System,
            content: content.clone(),
        });
        let turns = self.turns.iter().enumerate().map(|(i, content)| ChatMessage {
            role: if i % 2 == 0 { Role::User } else { Role::Assistant },
            content: content.clone(),
        });
        system.chain(turns).collect()
    }

    /// Drops the oldest user/assistant pair, keeping at least the final turn.
    ///
    /// Returns false when there is nothing left to drop.
    pub fn drop_oldest_example(&mut self) -> bool {
        if self.turns.len() > 2 {
            self.turns.drain(..2);
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub total_tokens: u64,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("completion service rate limited: {0}")]
    RateLimited(String),

    #[error("completion service API error: {0}")]
    Api(String),

    #[error("completion request rejected: {0}")]
    InvalidRequest(String),

    #[error("completion service rejected credentials: {0}")]
    Unauthorized(String),

    #[error("completion failed after {tries} tries")]
    Exhausted {
        tries: u32,
        #[source]
        last: Box<CompletionError>,
    },
}

impl CompletionError {
    /// Short label used in retry logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::ServiceUnavailable(_) => "service_unavailable",
            CompletionError::RateLimited(_) => "rate_limited",
            CompletionError::Api(_) => "api",
            CompletionError::InvalidRequest(_) => "invalid_request",
            CompletionError::Unauthorized(_) => "unauthorized",
            CompletionError::Exhausted { .. } => "exhausted",
        }
    }
}

/// Service turning a conversation into one assistant reply.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_alternate_after_system() {
        let request = ChatRequest::new(
            "sys",
            vec!["u1".to_string(), "a1".to_string(), "u2".to_string()],
        );
        let roles: Vec<_> = request.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
    }

    #[test]
    fn empty_system_message_is_omitted() {
        let request = ChatRequest::new("", vec!["u".to_string()]);
        assert_eq!(request.messages().len(), 1);
    }

    #[test]
    fn dropping_examples_keeps_final_turn() {
        let mut request = ChatRequest::new(
            "sys",
            vec!["u1".to_string(), "a1".to_string(), "u2".to_string()],
        );
        assert!(request.drop_oldest_example());
        assert_eq!(request.turns, vec!["u2"]);
        assert!(!request.drop_oldest_example());
        assert_eq!(request.turns, vec!["u2"]);
    }
}
