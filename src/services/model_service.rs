use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// A single request/response exchange with a chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Model-call boundary. One request in, one text completion out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> AppResult<String>;
}

/// `ChatModel` backed by any OpenAI-compatible chat completions endpoint.
pub struct OpenAiChatModel {
    client: Client<OpenAIConfig>,
}

impl OpenAiChatModel {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.expose_secret())
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
        }
    }

    fn to_openai_message(message: &ChatMessage) -> AppResult<ChatCompletionRequestMessage> {
        let converted = match message.role {
            ChatRole::System => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(message.content.as_str())
                    .build()?,
            ),
            ChatRole::User => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.as_str())
                    .build()?,
            ),
        };

        Ok(converted)
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, request: ChatRequest) -> AppResult<String> {
        log::debug!(
            "Sending {} message(s) to model {}",
            request.messages.len(),
            request.model
        );

        let messages = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<AppResult<Vec<_>>>()?;

        let completion_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .build()?;

        let response = self
            .client
            .chat()
            .create(completion_request)
            .await
            .map_err(|e| {
                log::warn!("Model call to {} failed: {}", request.model, e);
                AppError::GenerationFailed(e.to_string())
            })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::MalformedResponse("model returned no content".to_string()))?;

        log::debug!("Model {} replied with {} characters", request.model, content.len());

        Ok(content)
    }
}
