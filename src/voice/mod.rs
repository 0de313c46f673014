//! Voice capability surface
//!
//! Capture and synthesis are delegated to host engines behind traits;
//! voice selection is local name-pattern matching.

mod capability;
mod recognition;
mod selector;
mod synthesis;

pub use capability::{probe, CapabilityReport};
pub use recognition::{RecognitionError, SpeechRecognizer};
pub use selector::{select_voice, GenderPreference, VoiceProfile};
pub use synthesis::{SpeechSynthesizer, SpeechUtterance};
