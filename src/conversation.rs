//! In-memory conversation history
//!
//! One `ConversationStore` lives for the duration of a session and is written
//! only by the orchestrator. Turns are appended, never edited or reordered.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Speaker {
    User,
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "User"),
            Self::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One utterance by the user or the assistant
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub text: String,
    pub speaker: Speaker,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a user turn with a fresh id and timestamp
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Speaker::User)
    }

    /// Create an assistant turn with a fresh id and timestamp
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Speaker::Assistant)
    }

    fn new(text: impl Into<String>, speaker: Speaker) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            speaker,
            created_at: Utc::now(),
        }
    }

    /// Whether this turn was spoken by the user
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self.speaker, Speaker::User)
    }
}

/// Append-only ordered log of turns for one session
///
/// Insertion order is chronological order. There is no removal operation;
/// the store is discarded with the session.
#[derive(Debug, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Append a turn, preserving insertion order
    pub fn append(&mut self, turn: Turn) {
        tracing::debug!(id = %turn.id, speaker = %turn.speaker, "turn appended");
        self.turns.push(turn);
    }

    /// The last `n` turns in chronological order (fewer if history is shorter)
    #[must_use]
    pub fn recent_window(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// All turns in chronological order
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of recorded turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the session has no history yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
