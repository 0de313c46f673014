//! Murmur Gateway - Voice chat gateway for AI assistants
//!
//! This library provides the core functionality for the Murmur gateway:
//! - Conversational turn-taking orchestration (capture → reply → playback)
//! - Voice selection over host-provided synthesis voices
//! - Prompt/context assembly for the completion service
//! - The `/api/chat` HTTP endpoint fronting the Gemini API
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Host capabilities                    │
//! │   Speech recognition  │  Speech synthesis           │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                Turn orchestrator                     │
//! │   Phase machine │ Conversation store │ Voice select │
//! └────────────────────┬────────────────────────────────┘
//!                      │ POST /api/chat
//! ┌────────────────────▼────────────────────────────────┐
//! │              Gateway API server                      │
//! │   Context builder  │  Gemini completion backend     │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod voice;

pub use chat::{ChatService, HttpChatClient};
pub use config::Config;
pub use context::{ContextBuilder, DateTimeInfo, CONTEXT_WINDOW, SYSTEM_PREAMBLE};
pub use conversation::{ConversationStore, Speaker, Turn};
pub use error::{Error, Result};
pub use llm::{CompletionBackend, GeminiClient};
pub use orchestrator::{Phase, TurnOrchestrator, TurnOutcome};
pub use voice::{
    probe, select_voice, CapabilityReport, GenderPreference, RecognitionError, SpeechRecognizer,
    SpeechSynthesizer, SpeechUtterance, VoiceProfile,
};
