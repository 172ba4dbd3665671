pub mod http;

pub use http::HttpTransport;

use crate::error::ChatError;
use async_trait::async_trait;
use serde_json::Value;

/// Backend routes the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Combined retrieval + generation.
    Chat,
    RelevantChunks,
    Generate,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Chat => "/chat",
            Endpoint::RelevantChunks => "/get_relevant_chunks",
            Endpoint::Generate => "/generate",
        }
    }
}

/// One outbound request per `send`, no retries. Non-2xx statuses come back as
/// `ChatError::Http`, unparseable bodies as `ChatError::Decode`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: Endpoint, payload: Value) -> Result<Value, ChatError>;
}
