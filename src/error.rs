use thiserror::Error;

/// Everything that can go wrong while turning a domain/description pair into
/// a batch of ideas.
#[derive(Debug, Error)]
pub enum IdeaError {
    #[error("GROQ_API_KEY not set")]
    MissingApiKey,
    #[error("request to provider failed: {0}")]
    Transport(String),
    // The response body is logged by the provider, never carried here.
    #[error("provider returned status {status}")]
    ProviderStatus { status: u16 },
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
    #[error("failed to parse JSON: {0}")]
    InvalidContent(String),
    #[error("expected {expected} ideas, got {actual}")]
    WrongIdeaCount { expected: usize, actual: usize },
    #[error("invalid idea format: idea {index} has an empty '{field}' field")]
    EmptyField { index: usize, field: &'static str },
}

impl IdeaError {
    /// The provider answered, but not with a chat completion envelope.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, IdeaError::UnexpectedFormat(_))
    }

    /// The completion text was not exactly three well-formed ideas.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            IdeaError::InvalidContent(_)
                | IdeaError::WrongIdeaCount { .. }
                | IdeaError::EmptyField { .. }
        )
    }
}

/// Invalid startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
