use rand::Rng;
use tracing::{debug, warn};

use crate::{
    presets::{self, Preset},
    synth::{plan::RenderPlan, volume::Volume},
};

/// Turns preset ids into render plans.
///
/// Stateless: the preset table is static, and randomness comes from the
/// caller (or the thread rng).
#[derive(Debug, Default, Clone, Copy)]
pub struct SynthesisEngine;

impl SynthesisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `id`, falling back to the default tone for unknown ids.
    pub fn resolve(&self, id: &str) -> &'static Preset {
        match presets::lookup(id) {
            Some(preset) => preset,
            None => {
                warn!(preset = id, "unknown preset, using default tone");
                presets::default_preset()
            }
        }
    }

    pub fn render(&self, id: &str, volume: Volume, now: f64) -> RenderPlan {
        self.render_with(id, volume, now, &mut rand::thread_rng())
    }

    /// Render with an explicit rng, for reproducible swarm timing.
    pub fn render_with<R: Rng + ?Sized>(
        &self,
        id: &str,
        volume: Volume,
        now: f64,
        rng: &mut R,
    ) -> RenderPlan {
        let preset = self.resolve(id);
        let voices = preset.recipe.voices(volume.get(), now, rng);
        debug!(
            preset = preset.id,
            family = preset.family.as_str(),
            voices = voices.len(),
            volume = volume.get(),
            "rendered preset"
        );
        RenderPlan::new(preset.id, now, voices)
    }
}
