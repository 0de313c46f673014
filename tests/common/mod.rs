//! Shared test utilities: scripted host capabilities and chat backends

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use murmur_gateway::{
    ChatService, Error, RecognitionError, Result, SpeechRecognizer, SpeechSynthesizer,
    SpeechUtterance, Turn, VoiceProfile,
};

/// Recognizer that replays scripted session results
///
/// When the script is exhausted, `recognize` blocks until `stop` is called
/// and then resolves with `Stopped`, like a host session with no speech and
/// no timeout.
pub struct ScriptedRecognizer {
    available: bool,
    script: Mutex<VecDeque<std::result::Result<String, RecognitionError>>>,
    stop_signal: Notify,
}

impl ScriptedRecognizer {
    #[must_use]
    pub fn with_transcript(text: &str) -> Self {
        Self::scripted(vec![Ok(text.to_string())])
    }

    #[must_use]
    pub fn with_error(error: RecognitionError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// Recognizer whose next session never produces a result on its own
    #[must_use]
    pub fn pending() -> Self {
        Self::scripted(Vec::new())
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            script: Mutex::new(VecDeque::new()),
            stop_signal: Notify::new(),
        }
    }

    fn scripted(results: Vec<std::result::Result<String, RecognitionError>>) -> Self {
        Self {
            available: true,
            script: Mutex::new(results.into()),
            stop_signal: Notify::new(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    fn available(&self) -> bool {
        self.available
    }

    async fn recognize(&self) -> std::result::Result<String, RecognitionError> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => {
                self.stop_signal.notified().await;
                Err(RecognitionError::Stopped)
            }
        }
    }

    fn stop(&self) {
        self.stop_signal.notify_one();
    }
}

/// Synthesizer that records spoken utterances
pub struct RecordingSynthesizer {
    available: bool,
    voices: Vec<VoiceProfile>,
    fail_playback: bool,
    pub spoken: Mutex<Vec<SpeechUtterance>>,
}

impl RecordingSynthesizer {
    #[must_use]
    pub fn with_voices(voices: Vec<VoiceProfile>) -> Self {
        Self {
            available: true,
            voices,
            fail_playback: false,
            spoken: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            available: true,
            voices: Vec::new(),
            fail_playback: true,
            spoken: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            voices: Vec::new(),
            fail_playback: false,
            spoken: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    fn available(&self) -> bool {
        self.available
    }

    async fn voices(&self) -> Vec<VoiceProfile> {
        self.voices.clone()
    }

    async fn speak(&self, utterance: &SpeechUtterance) -> std::result::Result<(), String> {
        self.spoken.lock().unwrap().push(utterance.clone());
        if self.fail_playback {
            Err("synthesis engine failure".to_string())
        } else {
            Ok(())
        }
    }
}

/// Record of one chat exchange seen by a mock service
#[derive(Debug, Clone)]
pub struct SeenExchange {
    pub message: String,
    pub history_len: usize,
    pub timezone: Option<String>,
}

/// Chat service with a fixed reply or failure, recording what it was sent
pub struct StubChat {
    reply: std::result::Result<String, String>,
    pub seen: Mutex<Vec<SeenExchange>>,
}

impl StubChat {
    #[must_use]
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(detail: &str) -> Self {
        Self {
            reply: Err(detail.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatService for StubChat {
    async fn send(
        &self,
        message: &str,
        history: &[Turn],
        timezone: Option<&str>,
    ) -> Result<String> {
        self.seen.lock().unwrap().push(SeenExchange {
            message: message.to_string(),
            history_len: history.len(),
            timezone: timezone.map(ToString::to_string),
        });
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(detail) => Err(Error::Upstream(detail.clone())),
        }
    }
}

/// Completion backend with a fixed reply or failure, recording prompts
pub struct StubCompletion {
    reply: std::result::Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    #[must_use]
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(detail: &str) -> Self {
        Self {
            reply: Err(detail.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl murmur_gateway::CompletionBackend for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(detail) => Err(Error::Upstream(detail.clone())),
        }
    }
}

/// Chat service that signals entry and blocks until released
///
/// Lets tests observe the orchestrator mid-turn deterministically.
pub struct GatedChat {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
    reply: String,
}

impl GatedChat {
    #[must_use]
    pub fn new(reply: &str) -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl ChatService for GatedChat {
    async fn send(
        &self,
        _message: &str,
        _history: &[Turn],
        _timezone: Option<&str>,
    ) -> Result<String> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.reply.clone())
    }
}

/// Synthesizer that signals entry and blocks playback until released
///
/// Records each utterance before blocking, so a test can inspect the
/// in-flight utterance while playback is held open.
pub struct GatedSynthesizer {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
    voices: Vec<VoiceProfile>,
    pub spoken: Mutex<Vec<SpeechUtterance>>,
}

impl GatedSynthesizer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_voices(Vec::new())
    }

    #[must_use]
    pub fn with_voices(voices: Vec<VoiceProfile>) -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            voices,
            spoken: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GatedSynthesizer {
    fn available(&self) -> bool {
        true
    }

    async fn voices(&self) -> Vec<VoiceProfile> {
        self.voices.clone()
    }

    async fn speak(&self, utterance: &SpeechUtterance) -> std::result::Result<(), String> {
        self.spoken.lock().unwrap().push(utterance.clone());
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}
