//! Runtime configuration read from the environment (and a `.env` file when
//! present).
use crate::error::ConfigError;
use dotenvy::dotenv;
use reqwest::Url;
use std::str::FromStr;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// How a submission reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// One `/chat` call returning chunks and the answer together.
    #[default]
    Combined,
    /// `/get_relevant_chunks`, then `/generate` with the retrieved texts.
    TwoStep,
}

impl FromStr for Flow {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(Flow::Combined),
            "two-step" | "two_step" | "twostep" => Ok(Flow::TwoStep),
            other => Err(ConfigError::UnknownFlow(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub flow: Flow,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("DOCUMIND_BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = parse_backend_url(raw_url.trim())?;

        let flow = match lookup("DOCUMIND_FLOW") {
            Some(v) if !v.trim().is_empty() => v.parse()?,
            _ => Flow::default(),
        };

        Ok(Config { backend_url, flow })
    }
}

fn parse_backend_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBackendUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
