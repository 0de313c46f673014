//! Synthesis voice selection
//!
//! Picks the best available voice for a gender preference by name-pattern
//! matching. The name lists are ad hoc and deliberately frozen: host speech
//! APIs expose no reliable gender metadata, so this is best-effort string
//! matching with a documented precedence, not semantic gender detection.

/// One synthesis voice available from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Display identifier, e.g. "Samantha" or "Google US English"
    pub name: String,
    /// Locale code, e.g. "en-US"
    pub language_tag: String,
}

impl VoiceProfile {
    /// Create a voice profile
    #[must_use]
    pub fn new(name: impl Into<String>, language_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language_tag: language_tag.into(),
        }
    }
}

/// User-selected voice gender preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderPreference {
    Male,
    #[default]
    Female,
}

impl std::fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Name substrings that indicate a female voice
const FEMALE_NAME_HINTS: &[&str] = &[
    "female", "samantha", "karen", "victoria", "zoe", "allison", "susan", "kate", "salli",
    "joanna", "amy", "emma",
];

/// Name substrings that indicate a male voice
const MALE_NAME_HINTS: &[&str] = &[
    "male", "alex", "daniel", "david", "fred", "thomas", "oliver", "matthew", "justin", "mark",
];

/// Select the best voice for a gender preference
///
/// Precedence, preserved exactly:
/// 1. Candidates are English-tagged voices; the full list when none are.
/// 2. First candidate (in list order) whose lowercased name matches a
///    gender hint for `preference`.
/// 3. Fallback: for Male, the first candidate named "default", exactly
///    "Google US English", or not containing "female"; for Female, the
///    first candidate.
/// 4. The first candidate, or `None` when there are no voices at all.
#[must_use]
pub fn select_voice(
    voices: &[VoiceProfile],
    preference: GenderPreference,
) -> Option<&VoiceProfile> {
    let english: Vec<&VoiceProfile> = voices
        .iter()
        .filter(|v| v.language_tag.starts_with("en"))
        .collect();

    let candidates: Vec<&VoiceProfile> = if english.is_empty() {
        voices.iter().collect()
    } else {
        english
    };

    let matched = candidates.iter().find(|v| {
        let name = v.name.to_lowercase();
        match preference {
            GenderPreference::Female => {
                FEMALE_NAME_HINTS.iter().any(|hint| name.contains(hint))
                    || (name.contains("google") && !name.contains("male"))
            }
            GenderPreference::Male => {
                MALE_NAME_HINTS.iter().any(|hint| name.contains(hint))
                    || name.contains("google us-english")
                    || name.contains("microsoft david")
            }
        }
    });

    if let Some(voice) = matched.copied() {
        tracing::debug!(voice = %voice.name, %preference, "voice matched by name hint");
        return Some(voice);
    }

    let fallback = candidates.iter().find(|v| match preference {
        GenderPreference::Male => {
            let name = v.name.to_lowercase();
            name.contains("default") || v.name == "Google US English" || !name.contains("female")
        }
        GenderPreference::Female => true,
    });

    fallback.or_else(|| candidates.first()).copied()
}
