//! Language model abstraction.

mod openai;

pub use openai::OpenAiChat;

use crate::error::Result;
use async_trait::async_trait;

/// Speaker role for a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a model conversation.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// A chat-style language model.
///
/// One call is one request/response exchange; callers own any conversation
/// state and pass the full transcript each time.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, turns: &[Turn]) -> Result<String>;
}
