//! Conversational turn-taking orchestration
//!
//! The single stateful core of the gateway: one state machine driving
//! capture → transcript → context → remote call → playback. All mutable
//! session state (phase, history, voice preference) is owned here, so the
//! mutual-exclusion invariant lives in one place: a new capture or text
//! submission is refused unless the machine is idle.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chat::ChatService;
use crate::context::CONTEXT_WINDOW;
use crate::conversation::{ConversationStore, Turn};
use crate::voice::{
    probe, select_voice, CapabilityReport, GenderPreference, RecognitionError, SpeechRecognizer,
    SpeechSynthesizer, SpeechUtterance,
};
use crate::{Error, Result};

/// Where the turn machine currently is
///
/// The machine is cyclic for the life of the session; every phase
/// eventually returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ready for a new capture or text submission
    Idle,
    /// A recognition session is active
    Listening,
    /// The remote completion call is in flight
    AwaitingReply,
    /// The assistant reply is being spoken
    Speaking,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Listening => write!(f, "listening"),
            Self::AwaitingReply => write!(f, "awaiting reply"),
            Self::Speaking => write!(f, "speaking"),
        }
    }
}

/// How a driven turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The exchange completed; playback (if available) has finished
    Completed {
        /// The assistant's reply text
        reply: String,
    },
    /// Capture was stopped before a transcript was produced
    Cancelled,
}

/// Drives one voice or text turn at a time
pub struct TurnOrchestrator {
    phase: Mutex<Phase>,
    store: Mutex<ConversationStore>,
    preference: Mutex<GenderPreference>,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    chat: Arc<dyn ChatService>,
    timezone: Option<String>,
}

impl TurnOrchestrator {
    /// Create an orchestrator over the host capabilities and chat service
    ///
    /// `timezone` is the interactive client's IANA timezone, forwarded with
    /// every chat request when present.
    #[must_use]
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        chat: Arc<dyn ChatService>,
        timezone: Option<String>,
    ) -> Self {
        Self {
            phase: Mutex::new(Phase::Idle),
            store: Mutex::new(ConversationStore::new()),
            preference: Mutex::new(GenderPreference::default()),
            recognizer,
            synthesizer,
            chat,
            timezone,
        }
    }

    /// Current phase of the turn machine
    pub async fn phase(&self) -> Phase {
        *self.phase.lock().await
    }

    /// Probe the host speech capabilities
    #[must_use]
    pub fn capabilities(&self) -> CapabilityReport {
        probe(self.recognizer.as_ref(), self.synthesizer.as_ref())
    }

    /// Change the voice gender preference
    ///
    /// Allowed in any phase; affects only the voice chosen for subsequent
    /// playback, never in-flight operations or the history.
    pub async fn set_preference(&self, preference: GenderPreference) {
        *self.preference.lock().await = preference;
        tracing::debug!(%preference, "voice preference updated");
    }

    /// Current voice gender preference
    pub async fn preference(&self) -> GenderPreference {
        *self.preference.lock().await
    }

    /// Snapshot of the session history in chronological order
    pub async fn turns(&self) -> Vec<Turn> {
        self.store.lock().await.turns().to_vec()
    }

    /// Number of recorded turns
    pub async fn turn_count(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Run one voice turn: capture, transcribe, exchange, speak
    ///
    /// Rejected unless the machine is idle and recognition is available.
    /// An empty-after-trim transcript is discarded without recording a turn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityUnavailable`] when the host has no speech
    /// recognition, [`Error::Busy`] when a turn is already in flight,
    /// recognition errors mapped per kind, [`Error::EmptyInput`] for a blank
    /// transcript, and [`Error::Upstream`] when the completion call fails
    /// (the user turn stays recorded).
    pub async fn capture_turn(&self) -> Result<TurnOutcome> {
        if !self.recognizer.available() {
            return Err(Error::CapabilityUnavailable("speech recognition"));
        }

        self.begin(Phase::Listening).await?;
        tracing::info!("listening");

        match self.recognizer.recognize().await {
            Ok(raw) => {
                let text = raw.trim().to_string();
                if text.is_empty() {
                    self.reset().await;
                    return Err(Error::EmptyInput);
                }
                tracing::info!(transcript = %text, "speech recognized");
                self.transition(Phase::AwaitingReply).await;
                self.run_exchange(&text).await
            }
            Err(kind) => {
                self.reset().await;
                match kind {
                    RecognitionError::Stopped => {
                        tracing::debug!("capture stopped before transcript");
                        Ok(TurnOutcome::Cancelled)
                    }
                    RecognitionError::PermissionDenied => Err(Error::PermissionDenied),
                    RecognitionError::NoSpeech => Err(Error::NoSpeechDetected),
                    RecognitionError::Other(detail) => Err(Error::RecognitionFailed(detail)),
                }
            }
        }
    }

    /// Stop an active capture
    ///
    /// The only supported cancellation: `Listening` returns to `Idle` with
    /// no transcript and no history side effects. A no-op in other phases.
    pub fn stop_capture(&self) {
        self.recognizer.stop();
    }

    /// Run one text turn, bypassing capture
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for blank text (no state transition, no
    /// turn recorded), [`Error::Busy`] when a turn is already in flight, and
    /// [`Error::Upstream`] when the completion call fails.
    pub async fn submit_text(&self, text: &str) -> Result<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        self.begin(Phase::AwaitingReply).await?;
        self.run_exchange(text).await
    }

    /// Speak a short sample with the currently selected voice
    ///
    /// No turn is recorded; the same idle/busy exclusion applies as for
    /// playback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityUnavailable`] when the host has no speech
    /// synthesis, [`Error::Busy`] mid-turn, and [`Error::Playback`] when the
    /// engine reports a playback failure.
    pub async fn test_voice(&self) -> Result<()> {
        if !self.synthesizer.available() {
            return Err(Error::CapabilityUnavailable("speech synthesis"));
        }

        self.begin(Phase::Speaking).await?;
        let preference = self.preference().await;
        let text = format!("Hello! This is the {preference} voice speaking");

        let result = self.speak(&text).await;
        self.reset().await;
        result.map_err(Error::Playback)
    }

    /// Exchange one utterance with the completion service, then speak the
    /// reply. Phase must already be `AwaitingReply`.
    async fn run_exchange(&self, text: &str) -> Result<TurnOutcome> {
        // History snapshot excludes the new utterance; the user turn is
        // still appended before the remote call is issued.
        let history = {
            let mut store = self.store.lock().await;
            let history = store.recent_window(CONTEXT_WINDOW).to_vec();
            store.append(Turn::user(text));
            history
        };

        let reply = match self
            .chat
            .send(text, &history, self.timezone.as_deref())
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                // The user turn stays recorded; partial failure is visible
                // in the history.
                tracing::warn!(error = %e, "chat exchange failed");
                self.reset().await;
                return Err(e);
            }
        };

        self.store.lock().await.append(Turn::assistant(&reply));
        self.transition(Phase::Speaking).await;

        if let Err(detail) = self.speak(&reply).await {
            tracing::warn!(error = %detail, "playback failed");
        }
        self.reset().await;

        Ok(TurnOutcome::Completed { reply })
    }

    /// Speak text with the preferred voice; skipped when synthesis is absent
    async fn speak(&self, text: &str) -> std::result::Result<(), String> {
        if !self.synthesizer.available() {
            tracing::debug!("speech synthesis unavailable, skipping playback");
            return Ok(());
        }

        let voices = self.synthesizer.voices().await;
        let preference = self.preference().await;
        let voice = select_voice(&voices, preference).cloned();
        if let Some(v) = &voice {
            tracing::debug!(voice = %v.name, %preference, "speaking with selected voice");
        }

        let utterance = SpeechUtterance::new(text).with_voice(voice);
        self.synthesizer.speak(&utterance).await
    }

    /// Enter `next` from `Idle`, refusing when a turn is already in flight
    async fn begin(&self, next: Phase) -> Result<()> {
        let mut phase = self.phase.lock().await;
        if *phase != Phase::Idle {
            return Err(Error::Busy(*phase));
        }
        *phase = next;
        Ok(())
    }

    /// Internal transition within an in-flight turn
    async fn transition(&self, next: Phase) {
        let mut phase = self.phase.lock().await;
        let from = *phase;
        tracing::trace!(%from, %next, "phase transition");
        *phase = next;
    }

    /// Return to `Idle`
    async fn reset(&self) {
        self.transition(Phase::Idle).await;
    }
}
