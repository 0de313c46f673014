//! Completion backend for the server-side chat handler
//!
//! The prompt is opaque here: it is assembled by the context builder and
//! forwarded to the model as a single text part.

use async_trait::async_trait;

use crate::{Error, Result};

/// Default Gemini model for chat completions
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A black-box text completion service
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Complete a prompt, returning the reply text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`] when the model call fails or returns a
    /// non-success status.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Gemini `generateContent` client
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a Gemini client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Gemini API key required for completions".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (for self-hosted proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        #[derive(serde::Serialize)]
        struct Part<'a> {
            text: &'a str,
        }

        #[derive(serde::Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }

        #[derive(serde::Serialize)]
        struct GenerateRequest<'a> {
            contents: Vec<Content<'a>>,
        }

        #[derive(serde::Deserialize)]
        struct GenerateResponse {
            candidates: Vec<Candidate>,
        }

        #[derive(serde::Deserialize)]
        struct Candidate {
            content: CandidateContent,
        }

        #[derive(serde::Deserialize)]
        struct CandidateContent {
            parts: Vec<CandidatePart>,
        }

        #[derive(serde::Deserialize)]
        struct CandidatePart {
            text: String,
        }

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("Gemini error {status}: {body}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("malformed Gemini response: {e}")))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::Upstream("Gemini returned no candidates".to_string()))?;

        tracing::debug!(chars = text.len(), "completion received");
        Ok(text)
    }
}
