//! OpenAI-compatible chat-completions client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::{Error, Result};

use super::{CompletionClient, SamplingOptions};

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role ("system" or "user")
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response body from the chat-completions endpoint
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Completion client for any OpenAI-compatible chat endpoint
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpCompletionClient {
    /// Create a new client from a completion configuration
    pub fn new(config: &CompletionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        sampling: &SamplingOptions,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: sampling.temperature,
            max_tokens: sampling.max_tokens,
        };

        let mut builder = self.client.post(&self.api_url).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Completion(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Completion(format!(
                "Completion service returned {}",
                status
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Completion(format!("Invalid response body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Completion("No choices in completion response".to_string()))
    }
}
