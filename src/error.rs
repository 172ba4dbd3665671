use serde::Serialize;
use std::fmt;

/// Which leg of the two-step exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Retrieval,
    Generation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Retrieval => f.write_str("Failed to fetch chunks"),
            Stage::Generation => f.write_str("LLM generation failed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Please enter a prompt.")]
    Validation,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-2xx response. `message` is the server's `error` field, or the status text.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Invalid response from server: {0}")]
    Decode(String),
    #[error("{stage}: {source}")]
    Stage {
        stage: Stage,
        source: Box<ChatError>,
    },
    #[error("A request is already in progress.")]
    Busy,
    #[error("Unexpected failure: {0}")]
    Internal(String),
}

impl ChatError {
    pub fn in_stage(self, stage: Stage) -> Self {
        ChatError::Stage {
            stage,
            source: Box::new(self),
        }
    }
}

impl Serialize for ChatError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid backend url {url:?}: {reason}")]
    InvalidBackendUrl { url: String, reason: String },
    #[error("unknown flow {0:?}, expected \"combined\" or \"two-step\"")]
    UnknownFlow(String),
}
