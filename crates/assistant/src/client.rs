//! Chat completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;

/// Instructions sent ahead of every visitor message.
const SYSTEM_PROMPT: &str = "You are the assistant of a web development agency. \
Answer visitors' questions about the agency's services and projects briefly, \
in the visitor's language.";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// No API key is configured.
    #[error("Chat assistant is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Chat API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The API answered without any message content.
    #[error("Chat API returned an empty reply")]
    EmptyReply,
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// Produces an assistant reply for one visitor message.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, ChatError>;
}

/// Backend used when no API key is configured. Every call fails.
pub struct UnconfiguredChat;

#[async_trait]
impl ChatBackend for UnconfiguredChat {
    async fn reply(&self, _message: &str) -> Result<String, ChatError> {
        Err(ChatError::NotConfigured)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the first non-blank reply out of a completion response.
fn first_reply(response: CompletionResponse) -> Result<String, ChatError> {
    response
        .choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty())
        .ok_or(ChatError::EmptyReply)
}

// ---------------------------------------------------------------------------
// OpenAiChat
// ---------------------------------------------------------------------------

/// HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiChat {
    client: reqwest::Client,
    config: ChatConfig,
}

impl OpenAiChat {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }
}

#[async_trait]
impl ChatBackend for OpenAiChat {
    async fn reply(&self, message: &str) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ChatError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let reply = first_reply(response.json::<CompletionResponse>().await?)?;
        tracing::debug!(model = %self.config.model, chars = reply.len(), "Chat reply received");
        Ok(reply)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
