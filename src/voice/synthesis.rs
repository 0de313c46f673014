//! Speech synthesis capability
//!
//! Wraps the host synthesis engine behind a trait the orchestrator can await.
//! Voice lists may be populated lazily by the host, so enumeration is async.

use async_trait::async_trait;

use super::selector::VoiceProfile;

/// One utterance handed to the synthesis engine
#[derive(Debug, Clone)]
pub struct SpeechUtterance {
    pub text: String,
    /// Playback rate, slightly slowed for clarity
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Voice to speak with; the host default when `None`
    pub voice: Option<VoiceProfile>,
}

impl SpeechUtterance {
    /// Create an utterance with the default speech parameters
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            voice: None,
        }
    }

    /// Set the voice to speak with
    #[must_use]
    pub fn with_voice(mut self, voice: Option<VoiceProfile>) -> Self {
        self.voice = voice;
        self
    }
}

/// A host speech-synthesis engine
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Whether the host exposes speech synthesis at all
    fn available(&self) -> bool;

    /// Enumerate available voices
    ///
    /// Hosts may populate the list asynchronously after startup;
    /// implementations should wait for the first population when needed.
    async fn voices(&self) -> Vec<VoiceProfile>;

    /// Speak one utterance to completion
    ///
    /// # Errors
    ///
    /// Returns a playback error description when the engine reports one.
    async fn speak(&self, utterance: &SpeechUtterance) -> Result<(), String>;
}
