//! Host capability detection

use super::recognition::SpeechRecognizer;
use super::synthesis::SpeechSynthesizer;

/// Availability of the host speech capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityReport {
    pub recognition_available: bool,
    pub synthesis_available: bool,
}

/// Probe the host for speech capabilities
///
/// Pure detection: reads the capability flags and nothing else. Never fails;
/// absent capabilities are reported as unavailable, and operations that need
/// them are rejected at the orchestrator instead.
#[must_use]
pub fn probe(
    recognizer: &dyn SpeechRecognizer,
    synthesizer: &dyn SpeechSynthesizer,
) -> CapabilityReport {
    let report = CapabilityReport {
        recognition_available: recognizer.available(),
        synthesis_available: synthesizer.available(),
    };
    tracing::debug!(
        recognition = report.recognition_available,
        synthesis = report.synthesis_available,
        "probed host speech capabilities"
    );
    report
}
