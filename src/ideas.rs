// Prompt construction and validation of the generated ideas.
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ai::{ChatCompletion, ChatMessage, ChatProvider, ChatRequest};
use crate::error::IdeaError;

// Number of ideas a completion must contain.
pub const IDEA_COUNT: usize = 3;

// The "exactly 5" wording below disagrees with the user prompt and with
// IDEA_COUNT. It is sent to the model as-is; only IDEA_COUNT is enforced.
const SYSTEM_PROMPT: &str = "You are an AI assistant that generates project ideas. Your output must be a valid JSON array of objects, each with exactly three fields: 'name', 'concept', and 'features'. The 'features' field must be a single string with comma-separated values. Do not include any explanation or additional text. Generate exactly 5 ideas based on this format: [{'name': 'Project Name', 'concept': 'Short description', 'features': 'Feature 1, Feature 2, Feature 3'}]. Ensure the JSON array is properly closed with a square bracket ']' at the end.";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1240;
const TOP_P: f64 = 1.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdeaRequest {
    pub domain: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    pub name: String,
    pub concept: String,
    pub features: String,
}

impl Idea {
    // Name of the first empty field, if any.
    fn first_empty_field(&self) -> Option<&'static str> {
        if self.name.is_empty() {
            Some("name")
        } else if self.concept.is_empty() {
            Some("concept")
        } else if self.features.is_empty() {
            Some("features")
        } else {
            None
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdeaResponse {
    pub ideas: Vec<Idea>,
}

/// Turns a domain/description pair into exactly [`IDEA_COUNT`] ideas with a
/// single provider call.
pub struct IdeaGenerator {
    provider: Arc<dyn ChatProvider>,
    api_key: Option<String>,
    model: String,
}

impl IdeaGenerator {
    pub fn new(provider: Arc<dyn ChatProvider>, api_key: Option<String>, model: String) -> Self {
        Self {
            provider,
            // An empty key is as good as none.
            api_key: api_key.filter(|key| !key.is_empty()),
            model,
        }
    }

    pub async fn generate(&self, domain: &str, description: &str) -> Result<Vec<Idea>, IdeaError> {
        let api_key = self.api_key.as_deref().ok_or(IdeaError::MissingApiKey)?;

        let request = build_chat_request(&self.model, domain, description);
        log::info!(
            "requesting ideas for domain {:?} from {} ({})",
            domain,
            self.provider.name(),
            self.model
        );

        let body = self.provider.send_request(api_key, &request).await?;
        let content = ChatCompletion::content_from(body)?;

        parse_ideas(&content)
    }
}

pub(crate) fn build_chat_request(model: &str, domain: &str, description: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Generate {} project ideas for the domain: {}. Description: {}",
                IDEA_COUNT, domain, description
            )),
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        top_p: TOP_P,
        stream: false,
        stop: None,
    }
}

/// Parse completion text as a JSON array of exactly [`IDEA_COUNT`] ideas with
/// no empty fields. The whole batch fails on the first problem found.
pub fn parse_ideas(content: &str) -> Result<Vec<Idea>, IdeaError> {
    let ideas: Vec<Idea> =
        serde_json::from_str(content).map_err(|e| IdeaError::InvalidContent(e.to_string()))?;

    if ideas.len() != IDEA_COUNT {
        return Err(IdeaError::WrongIdeaCount {
            expected: IDEA_COUNT,
            actual: ideas.len(),
        });
    }

    for (index, idea) in ideas.iter().enumerate() {
        if let Some(field) = idea.first_empty_field() {
            return Err(IdeaError::EmptyField { index, field });
        }
    }

    Ok(ideas)
}
