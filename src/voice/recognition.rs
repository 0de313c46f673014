//! Speech recognition capability
//!
//! Host recognition engines are event-driven; this trait flattens one
//! recognition session into a single awaited result so the orchestrator's
//! state machine stays free of callback wiring. Sessions are single-shot:
//! English-US, no interim results, exactly one transcript or one error.

use async_trait::async_trait;

/// Why a recognition session ended without a transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// Microphone access refused by the user or host
    PermissionDenied,
    /// Session ended without detecting speech
    NoSpeech,
    /// Session was stopped by [`SpeechRecognizer::stop`]
    Stopped,
    /// Any other engine-reported failure
    Other(String),
}

impl std::fmt::Display for RecognitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "microphone access denied"),
            Self::NoSpeech => write!(f, "no speech detected"),
            Self::Stopped => write!(f, "recognition stopped"),
            Self::Other(detail) => write!(f, "recognition failed: {detail}"),
        }
    }
}

/// A host speech-recognition engine
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the host exposes speech recognition at all
    fn available(&self) -> bool;

    /// Run one recognition session to completion
    ///
    /// Resolves with the raw transcript, or with a [`RecognitionError`]
    /// describing why no transcript was produced. Implementations must not
    /// panic across this boundary.
    ///
    /// # Errors
    ///
    /// Returns the session's terminal error, including [`RecognitionError::Stopped`]
    /// when [`Self::stop`] was called mid-session.
    async fn recognize(&self) -> Result<String, RecognitionError>;

    /// Cancel the active session, if any
    ///
    /// The pending [`Self::recognize`] call resolves with
    /// [`RecognitionError::Stopped`]. A no-op when idle.
    fn stop(&self);
}
