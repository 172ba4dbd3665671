use crate::error::ChatError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User input that has been trimmed and checked to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn parse(raw: &str) -> Result<Self, ChatError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChatError::Validation);
        }
        Ok(Prompt(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Chunk identifiers arrive as either strings or numbers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ChunkId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkId::Text(s) => f.write_str(s),
            // Integral floats print without a fraction, e.g. `1.0` as `1`.
            ChunkId::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{}", v as i64)
                }
                _ => write!(f, "{}", n),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub id: ChunkId,
    pub text: String,
    /// Lower is more relevant.
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatResult {
    pub relevant_chunks: Vec<RetrievedChunk>,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Submitting,
    /// Two-step flow only: chunks are on screen, generation is pending.
    Retrieved(Vec<RetrievedChunk>),
    Succeeded(ChatResult),
    Failed(String),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::Submitting | RequestState::Retrieved(_))
    }
}

// ── Wire bodies ──

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub relevant_chunks: Vec<RetrievedChunk>,
    pub llm_response: String,
}

#[derive(Debug, Deserialize)]
pub struct RelevantChunksResponse {
    pub relevant_chunks: Vec<RetrievedChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `error` field as display text, unless it is absent or falsy
    /// (`null`, `false`, `0`, `""`).
    pub fn message(&self) -> Option<String> {
        use serde_json::Value;
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Rejects distances that cannot be displayed as a fixed-point score.
pub fn check_distances(chunks: &[RetrievedChunk]) -> Result<(), ChatError> {
    match chunks.iter().find(|c| !c.distance.is_finite()) {
        Some(chunk) => Err(ChatError::Decode(format!(
            "chunk {} has non-finite distance",
            chunk.id
        ))),
        None => Ok(()),
    }
}
