// Counting stand-in for a remote provider.
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::provider::{ChatProvider, ChatRequest};
use crate::error::IdeaError;

enum Reply {
    Body(Value),
    Refused,
    Status(u16),
}

pub(crate) struct MockProvider {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, ChatRequest)>>,
}

impl MockProvider {
    /// Replies with `body` verbatim.
    pub(crate) fn replying(body: Value) -> Self {
        Self::with_reply(Reply::Body(body))
    }

    /// Replies with a well-formed envelope whose content is `content`.
    pub(crate) fn with_content(content: &str) -> Self {
        Self::replying(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        }))
    }

    /// Fails every call as if the connection was refused.
    pub(crate) fn unreachable() -> Self {
        Self::with_reply(Reply::Refused)
    }

    /// Fails every call with a non-success HTTP status.
    pub(crate) fn failing_with_status(status: u16) -> Self {
        Self::with_reply(Reply::Status(status))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<(String, ChatRequest)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn send_request(&self, api_key: &str, request: &ChatRequest) -> Result<Value, IdeaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((api_key.to_string(), request.clone()));
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Refused => Err(IdeaError::Transport("connection refused".to_string())),
            Reply::Status(status) => Err(IdeaError::ProviderStatus { status: *status }),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
