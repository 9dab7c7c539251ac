pub mod groq;
pub mod provider;

#[cfg(test)]
pub(crate) mod mock;

pub use groq::GroqProvider;
pub use provider::{ChatCompletion, ChatMessage, ChatProvider, ChatRequest};
