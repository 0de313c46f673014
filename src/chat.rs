//! Chat client for the gateway's completion endpoint
//!
//! One request/response exchange per turn: no retry, no streaming. The wire
//! types here are shared with the server side of `/api/chat`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::conversation::Turn;
use crate::{Error, Result};

/// One history entry on the wire
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub text: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<&Turn> for HistoryEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id,
            text: turn.text.clone(),
            is_user: turn.is_user(),
            timestamp: turn.created_at,
        }
    }
}

/// Request body for `POST /api/chat`
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatRequest {
    /// Defaulted so an absent field reaches the handler's own 400 check
    /// instead of a generic deserialization rejection
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
    #[serde(
        rename = "userTimezone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_timezone: Option<String>,
}

/// Success body from `POST /api/chat`
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Failure body from `POST /api/chat`
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Sends one turn to the completion endpoint
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send a message with its recent history and timezone, returning the
    /// assistant's reply text
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMessage`] for a blank message without issuing
    /// a request, and [`Error::Upstream`] when the exchange fails.
    async fn send(
        &self,
        message: &str,
        history: &[Turn],
        timezone: Option<&str>,
    ) -> Result<String>;
}

/// HTTP chat client backed by the gateway's `/api/chat` endpoint
pub struct HttpChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatClient {
    /// Create a client for a chat endpoint URL
    /// (e.g. `http://localhost:18890/api/chat`)
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChatService for HttpChatClient {
    async fn send(
        &self,
        message: &str,
        history: &[Turn],
        timezone: Option<&str>,
    ) -> Result<String> {
        if message.trim().is_empty() {
            return Err(Error::MissingMessage);
        }

        let request = ChatRequest {
            message: message.to_string(),
            history: history.iter().map(HistoryEntry::from).collect(),
            user_timezone: timezone.map(ToString::to_string),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("chat request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ChatErrorBody>()
                .await
                .map_or_else(|_| status.to_string(), |body| {
                    body.details.unwrap_or(body.error)
                });
            return Err(Error::Upstream(format!("chat endpoint {status}: {detail}")));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("malformed chat response: {e}")))?;

        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_message_is_rejected_before_any_request() {
        // Endpoint is unreachable on purpose; a blank message must fail
        // locally without touching the network.
        let client = HttpChatClient::new("http://127.0.0.1:1/api/chat");
        let err = client.send("   ", &[], None).await.unwrap_err();
        assert!(matches!(err, Error::MissingMessage));
    }

    #[test]
    fn history_entry_mirrors_turn() {
        let turn = Turn::user("hello");
        let entry = HistoryEntry::from(&turn);
        assert_eq!(entry.id, turn.id);
        assert!(entry.is_user);
        assert_eq!(entry.text, "hello");
    }

    #[test]
    fn request_serializes_with_camel_case_fields() {
        let request = ChatRequest {
            message: "hi".to_string(),
            history: vec![HistoryEntry::from(&Turn::assistant("hey"))],
            user_timezone: Some("America/New_York".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userTimezone"], "America/New_York");
        assert_eq!(json["history"][0]["isUser"], false);
    }
}
