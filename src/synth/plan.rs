use crate::synth::voice::{VoiceKind, VoiceSpec};

/// The scheduled voices of one cue, in absolute device-clock time.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub preset: String,
    /// Clock time the plan was rendered for.
    pub issued_at: f64,
    pub voices: Vec<VoiceSpec>,
}

impl RenderPlan {
    pub fn new(preset: impl Into<String>, issued_at: f64, voices: Vec<VoiceSpec>) -> Self {
        Self {
            preset: preset.into(),
            issued_at,
            voices,
        }
    }

    pub fn count(&self, kind: VoiceKind) -> usize {
        self.voices.iter().filter(|v| v.kind() == kind).count()
    }

    /// Latest stop time over all voices, or `issued_at` for an empty plan.
    pub fn end_time(&self) -> f64 {
        self.voices
            .iter()
            .map(|v| v.stop)
            .fold(self.issued_at, f64::max)
    }

    /// Seconds from `issued_at` until the last voice stops.
    pub fn duration(&self) -> f64 {
        self.end_time() - self.issued_at
    }
}
