//! HTTP API server for Murmur gateway

pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::ContextBuilder;
use crate::llm::CompletionBackend;
use crate::Result;

/// Shared state for API handlers
pub struct ApiState {
    /// Completion backend; `None` when no API key is configured
    pub completion: Option<Arc<dyn CompletionBackend>>,
    /// Prompt assembler shared by all chat requests
    pub context_builder: ContextBuilder,
}

/// HTTP API server for the chat endpoint
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Create a server over a completion backend
    #[must_use]
    pub fn new(
        completion: Option<Arc<dyn CompletionBackend>>,
        context_builder: ContextBuilder,
        port: u16,
    ) -> Self {
        Self {
            state: Arc::new(ApiState {
                completion,
                context_builder,
            }),
            port,
        }
    }

    /// Build the router with all routes and middleware
    #[must_use]
    pub fn router(&self) -> Router {
        let router = Router::new()
            .merge(chat::router(self.state.clone()))
            .merge(health::router());

        // CORS for cross-origin requests from the web frontend
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
