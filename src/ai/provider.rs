use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::IdeaError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// Body of an OpenAI-compatible chat completion request. `stop` is always
// serialized, as `null` when unset.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub stream: bool,
    pub stop: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatCompletion {
    /// Decode a provider reply and return the first choice's message content.
    ///
    /// Any mismatch with `{choices: [{message: {content: string}}]}`, including
    /// an empty `choices` array, is reported as [`IdeaError::UnexpectedFormat`].
    pub fn content_from(body: Value) -> Result<String, IdeaError> {
        let completion: ChatCompletion = serde_json::from_value(body)
            .map_err(|e| IdeaError::UnexpectedFormat(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| IdeaError::UnexpectedFormat("response contains no choices".to_string()))
    }
}

/// A remote chat completion endpoint.
///
/// Implementations perform exactly one outbound call per `send_request` and
/// return the decoded JSON body untouched; envelope validation is left to the
/// caller.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn send_request(&self, api_key: &str, request: &ChatRequest) -> Result<Value, IdeaError>;
    fn name(&self) -> &str;
}
