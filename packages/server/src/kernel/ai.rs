// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseAI.
// What to ask for (categories, scores, summaries, assistant answers) lives in
// the domain layers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, Role};

use super::{BaseAI, ChatMessage, ChatRole};

/// OpenAI implementation of AI capabilities
#[derive(Clone)]
pub struct OpenAIClient {
    client: openai_client::OpenAIClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: model.into(),
            max_tokens: 500,
            temperature: 0.7,
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = self.client.with_http_client(client);
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    fn chat_request(&self, system: &str, messages: &[ChatMessage]) -> ChatRequest {
        ChatRequest::new(&self.model)
            .message(Message::system(system))
            .messages(messages.iter().map(to_message))
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
    }
}

fn to_message(message: &ChatMessage) -> Message {
    let role = match message.role {
        ChatRole::System => Role::System,
        ChatRole::User => Role::User,
        ChatRole::Assistant => Role::Assistant,
    };
    Message::new(role, message.content.as_str())
}

#[async_trait]
impl BaseAI for OpenAIClient {
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String> {
        let request = self.chat_request(system, messages);
        let response = self
            .client
            .chat_completion(&request)
            .await
            .context("OpenAI chat completion failed")?;
        Ok(response.content)
    }
}
