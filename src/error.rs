//! Error types for Murmur gateway

use thiserror::Error;

/// Result type alias for Murmur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Murmur gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech recognition or synthesis is not available in the host
    #[error("{0} is not available in this environment")]
    CapabilityUnavailable(&'static str),

    /// Microphone access was refused
    #[error("microphone access denied")]
    PermissionDenied,

    /// Recognition session ended without detecting speech
    #[error("no speech detected")]
    NoSpeechDetected,

    /// Speech recognition failed for another reason
    #[error("speech recognition error: {0}")]
    RecognitionFailed(String),

    /// Blank transcript or text submission
    #[error("empty input")]
    EmptyInput,

    /// A turn is already in flight; new capture/submission refused
    #[error("turn already in progress ({0})")]
    Busy(crate::orchestrator::Phase),

    /// Chat request had no message
    #[error("no message provided")]
    MissingMessage,

    /// Remote completion call failed or returned non-success
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Speech playback error
    #[error("playback error: {0}")]
    Playback(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
