//! Configuration management for Murmur gateway

use crate::llm;

/// Murmur gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API server configuration
    pub api_server: ApiServerConfig,

    /// Completion backend configuration
    pub llm: LlmConfig,

    /// Chat endpoint URL used by the embedded client
    /// (e.g. `http://localhost:18890/api/chat`)
    pub chat_endpoint: String,

    /// Client timezone override (IANA name), forwarded with chat requests
    /// Set via `MURMUR_TIMEZONE`
    pub timezone: Option<String>,
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to listen on
    pub port: u16,
}

/// Completion backend configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Gemini API key (from `GEMINI_API_KEY` env)
    pub api_key: Option<String>,

    /// Model identifier for chat completions
    pub model: String,

    /// System preamble override for the prompt
    pub preamble: Option<String>,
}

impl Config {
    /// Load configuration from the environment
    #[must_use]
    pub fn load() -> Self {
        let port = std::env::var("MURMUR_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(18890);

        let llm = LlmConfig {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: std::env::var("MURMUR_LLM_MODEL")
                .unwrap_or_else(|_| llm::DEFAULT_MODEL.to_string()),
            preamble: std::env::var("MURMUR_PREAMBLE").ok(),
        };

        let chat_endpoint = std::env::var("MURMUR_CHAT_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}/api/chat"));

        Self {
            api_server: ApiServerConfig { port },
            llm,
            chat_endpoint,
            timezone: std::env::var("MURMUR_TIMEZONE").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_matches_llm_module() {
        assert_eq!(llm::DEFAULT_MODEL, "gemini-1.5-flash");
    }
}
