//! Prompt assembly for the completion service
//!
//! Builds a single opaque prompt string from the system preamble, a date/time
//! block in the caller's timezone, the bounded recent history, and the new
//! user utterance. The completion client never inspects the result.

use std::str::FromStr;

use chrono::{Local, Utc};
use chrono_tz::Tz;

use crate::conversation::Turn;

/// Default system preamble instructing spoken-style replies
pub const SYSTEM_PREAMBLE: &str = "You are a helpful, friendly AI assistant. \
    Keep your responses conversational and concise, as they will be spoken aloud. \
    Aim for responses that are 1-3 sentences unless more detail is specifically requested.";

/// Maximum number of history turns included in a prompt
pub const CONTEXT_WINDOW: usize = 10;

/// Rendered date/time information for the prompt
///
/// Resolved in the caller-supplied IANA timezone when one is given,
/// otherwise in the host's local timezone.
#[derive(Debug, Clone)]
pub struct DateTimeInfo {
    /// Full weekday and date, e.g. "Monday, August 24, 2026"
    pub date: String,
    /// Clock time, e.g. "3:45 PM"
    pub time: String,
    /// Timezone label, the IANA name when supplied
    pub zone: String,
}

impl DateTimeInfo {
    /// Capture the current date and time in `timezone` when it names a valid
    /// IANA zone, falling back to the host's local timezone otherwise
    #[must_use]
    pub fn now(timezone: Option<&str>) -> Self {
        if let Some(name) = timezone {
            match Tz::from_str(name) {
                Ok(tz) => {
                    let now = Utc::now().with_timezone(&tz);
                    return Self {
                        date: now.format("%A, %B %-d, %Y").to_string(),
                        time: now.format("%-I:%M %p").to_string(),
                        zone: name.to_string(),
                    };
                }
                Err(_) => {
                    tracing::warn!(timezone = %name, "unknown timezone, using local time");
                }
            }
        }

        let now = Local::now();
        Self {
            date: now.format("%A, %B %-d, %Y").to_string(),
            time: now.format("%-I:%M %p").to_string(),
            zone: format!("UTC{}", now.format("%:z")),
        }
    }
}

/// Assembles prompts for the completion service
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    preamble: String,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextBuilder {
    /// Create a builder with the default preamble
    #[must_use]
    pub fn new() -> Self {
        Self {
            preamble: SYSTEM_PREAMBLE.to_string(),
        }
    }

    /// Create a builder with a custom preamble
    #[must_use]
    pub fn with_preamble(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    /// Build a prompt from the recent history and the new utterance
    ///
    /// `recent` is capped to the last [`CONTEXT_WINDOW`] turns. The output
    /// always ends with the `"User: <utterance>\nAssistant:"` cue that tells
    /// the model to continue as the assistant.
    #[must_use]
    pub fn build(&self, now: &DateTimeInfo, recent: &[Turn], utterance: &str) -> String {
        let start = recent.len().saturating_sub(CONTEXT_WINDOW);
        let window = &recent[start..];

        let mut prompt = String::with_capacity(256);
        prompt.push_str(&self.preamble);
        prompt.push_str("\n\n");
        prompt.push_str(&format!(
            "Current date and time: {}, {} ({})\n\n",
            now.date, now.time, now.zone
        ));

        for turn in window {
            prompt.push_str(&format!("{}: {}\n", turn.speaker, turn.text));
        }

        prompt.push_str(&format!("User: {utterance}\nAssistant:"));
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTimeInfo {
        DateTimeInfo {
            date: "Monday, August 24, 2026".to_string(),
            time: "3:45 PM".to_string(),
            zone: "America/New_York".to_string(),
        }
    }

    #[test]
    fn prompt_ends_with_assistant_cue() {
        let builder = ContextBuilder::new();
        let prompt = builder.build(&fixed_now(), &[], "What time is it?");
        assert!(prompt.ends_with("User: What time is it?\nAssistant:"));
    }

    #[test]
    fn prompt_includes_preamble_and_datetime() {
        let builder = ContextBuilder::new();
        let prompt = builder.build(&fixed_now(), &[], "hello");

        assert!(prompt.starts_with(SYSTEM_PREAMBLE));
        assert!(prompt.contains("Monday, August 24, 2026"));
        assert!(prompt.contains("3:45 PM"));
        assert!(prompt.contains("America/New_York"));
    }

    #[test]
    fn history_lines_preserve_order_and_speaker() {
        let builder = ContextBuilder::new();
        let recent = vec![Turn::user("hi"), Turn::assistant("hello!")];
        let prompt = builder.build(&fixed_now(), &recent, "how are you?");

        let user_pos = prompt.find("User: hi\n").unwrap();
        let assistant_pos = prompt.find("Assistant: hello!\n").unwrap();
        assert!(user_pos < assistant_pos);
    }

    #[test]
    fn history_is_capped_to_window() {
        let builder = ContextBuilder::new();
        let recent: Vec<Turn> = (0..20).map(|i| Turn::user(format!("msg {i}"))).collect();
        let prompt = builder.build(&fixed_now(), &recent, "latest");

        assert!(!prompt.contains("msg 9\n"));
        assert!(prompt.contains("msg 10\n"));
        assert!(prompt.contains("msg 19\n"));
    }

    #[test]
    fn datetime_info_resolves_iana_zone() {
        let info = DateTimeInfo::now(Some("America/New_York"));
        assert_eq!(info.zone, "America/New_York");
        assert!(!info.date.is_empty());
    }

    #[test]
    fn datetime_info_falls_back_on_unknown_zone() {
        let info = DateTimeInfo::now(Some("Not/AZone"));
        assert!(info.zone.starts_with("UTC"));
    }
}
