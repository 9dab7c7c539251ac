use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::provider::{ChatProvider, ChatRequest};
use crate::error::IdeaError;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

pub struct GroqProvider {
    client: Client,
    url: String,
}

impl GroqProvider {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, IdeaError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdeaError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    async fn send_request(&self, api_key: &str, request: &ChatRequest) -> Result<Value, IdeaError> {
        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Groq request failed: {}", e);
                IdeaError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("Groq API error ({}): {}", status, body);
            return Err(IdeaError::ProviderStatus { status });
        }

        response.json::<Value>().await.map_err(|e| {
            log::warn!("Failed to parse Groq response: {}", e);
            IdeaError::Transport(e.to_string())
        })
    }

    fn name(&self) -> &str {
        "Groq"
    }
}
