//! OpenAI-compatible chat model client.

use super::{LanguageModel, Role, Turn};
use crate::config::LlmSettings;
use crate::error::{Result, SpeidaError};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Chat model backed by any OpenAI-compatible endpoint.
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiChat {
    /// Build a client from settings. The API key and base URL come from the
    /// configuration assembled at composition time.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        let mut config = OpenAIConfig::new();
        if let Some(key) = &settings.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(base) = &settings.api_base {
            config = config.with_api_base(base.clone());
        }

        Ok(Self {
            client: Client::with_config(config).with_http_client(http_client),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

fn to_request_message(turn: &Turn) -> Result<ChatCompletionRequestMessage> {
    let message = match turn.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(turn.text.clone())
            .build()
            .map_err(|e| SpeidaError::Llm(e.to_string()))?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(turn.text.clone())
            .build()
            .map_err(|e| SpeidaError::Llm(e.to_string()))?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.text.clone())
            .build()
            .map_err(|e| SpeidaError::Llm(e.to_string()))?
            .into(),
    };
    Ok(message)
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn complete(&self, turns: &[Turn]) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = turns
            .iter()
            .map(to_request_message)
            .collect::<Result<_>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| SpeidaError::Llm(e.to_string()))?;

        debug!("Requesting completion from {} ({} turns)", self.model, turns.len());

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SpeidaError::Llm(format!("completion request failed: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| SpeidaError::Llm("empty response from model".to_string()))
    }
}
