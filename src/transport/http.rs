use super::{Endpoint, Transport};
use crate::error::ChatError;
use crate::models::ErrorBody;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: Endpoint, payload: Value) -> Result<Value, ChatError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!(%url, "POST");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "backend returned error status");
            return Err(http_error(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| ChatError::Decode(e.to_string()))
    }
}

/// Prefer the server's JSON `error` field; fall back to the status text.
fn http_error(status: StatusCode, body: &[u8]) -> ChatError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or(status.as_str())
                .to_string()
        });
    ChatError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_wins() {
        let err = http_error(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":"db down"}"#);
        match err {
            ChatError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_non_string_error_field_is_shown() {
        let err = http_error(StatusCode::SERVICE_UNAVAILABLE, br#"{"error":{"reason":"maintenance"}}"#);
        assert_eq!(err.to_string(), r#"{"reason":"maintenance"}"#);
    }

    #[test]
    fn test_falls_back_to_status_text() {
        let bodies: [&[u8]; 4] = [
            b"",
            b"<html>boom</html>",
            br#"{"detail":"x"}"#,
            br#"{"error":""}"#,
        ];
        for body in bodies {
            let err = http_error(StatusCode::BAD_GATEWAY, body);
            assert_eq!(err.to_string(), "Bad Gateway");
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let transport = HttpTransport::new("http://127.0.0.1:5000/");
        assert_eq!(transport.base_url(), "http://127.0.0.1:5000");
    }
}
