//! The fixed library of synthesized cues.
//!
//! Every preset is a row in a static table: an id, the family it belongs to,
//! and a [`Recipe`] holding its literal parameters. Recipes turn into voices
//! with [`Recipe::voices`]; nothing here is mutated at runtime.
//!
//! # Families
//!
//! - Percussive: a pitch sweep with a fast exponential decay (pop, drum, tap)
//! - Vibrato: a sustained carrier with an LFO on its pitch (whistle, cow)
//! - Harmonic: integer partials with independent decays (bell, piano)
//! - Texture: filtered noise with a moving cutoff (wind, whoosh)
//! - Swarm: many short random noise bursts (applause, rain)
//! - Call: a handful of short oscillator bursts (dog, siren, phone)
//!
//! # Example
//!
//! ```ignore
//! use audio_cues::presets;
//!
//! let bell = presets::lookup("bell").unwrap();
//! let plan = bell.recipe.voices(0.6, now, &mut rand::thread_rng());
//! ```

mod calls;
mod harmonic;
mod percussive;
mod swarm;
mod texture;
mod vibrato;

use rand::Rng;
use serde::Serialize;

use crate::{
    dsp::{curve::ParamCurve, oscillator::Waveform},
    synth::voice::VoiceSpec,
};

pub use calls::{Burst, Calls};
pub use harmonic::{Harmonic, Strike};
pub use percussive::Percussive;
pub use swarm::Swarm;
pub use texture::Texture;
pub use vibrato::Vibrato;

/// Id of the fallback tone.
pub const DEFAULT_PRESET: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Percussive,
    Vibrato,
    Harmonic,
    Texture,
    Swarm,
    Call,
    Default,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Percussive => "percussive",
            Family::Vibrato => "vibrato",
            Family::Harmonic => "harmonic",
            Family::Texture => "texture",
            Family::Swarm => "swarm",
            Family::Call => "call",
            Family::Default => "default",
        }
    }
}

/// A plain decaying tone.
#[derive(Debug, Clone, Copy)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency: f32,
    pub duration: f64,
    pub attack: f64,
    pub gain: f32,
}

impl Tone {
    pub fn voices(&self, volume: f32, now: f64) -> Vec<VoiceSpec> {
        let end = now + self.duration;
        vec![VoiceSpec::oscillator(
            self.waveform,
            ParamCurve::constant(self.frequency),
            ParamCurve::decay(self.gain * volume, now, self.attack, end),
            now,
            end,
        )]
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Recipe {
    Percussive(Percussive),
    Vibrato(Vibrato),
    Harmonic(Harmonic),
    Texture(Texture),
    Swarm(Swarm),
    Call(Calls),
    Tone(Tone),
}

impl Recipe {
    /// Voices for one playback at `volume`, starting at clock time `now`.
    ///
    /// `rng` only picks swarm timing and noise seeds; everything else is a
    /// pure function of the parameters.
    pub fn voices<R: Rng + ?Sized>(&self, volume: f32, now: f64, rng: &mut R) -> Vec<VoiceSpec> {
        match self {
            Recipe::Percussive(r) => r.voices(volume, now),
            Recipe::Vibrato(r) => r.voices(volume, now),
            Recipe::Harmonic(r) => r.voices(volume, now),
            Recipe::Texture(r) => r.voices(volume, now, rng),
            Recipe::Swarm(r) => r.voices(volume, now, rng),
            Recipe::Call(r) => r.voices(volume, now),
            Recipe::Tone(r) => r.voices(volume, now),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub id: &'static str,
    pub family: Family,
    pub recipe: Recipe,
}

const fn preset(id: &'static str, family: Family, recipe: Recipe) -> Preset {
    Preset { id, family, recipe }
}

pub static PRESETS: &[Preset] = &[
    // Percussive
    preset("pop", Family::Percussive, Recipe::Percussive(percussive::POP)),
    preset("boop", Family::Percussive, Recipe::Percussive(percussive::BOOP)),
    preset("drum", Family::Percussive, Recipe::Percussive(percussive::DRUM)),
    preset("click", Family::Percussive, Recipe::Percussive(percussive::CLICK)),
    preset("knock", Family::Percussive, Recipe::Percussive(percussive::KNOCK)),
    preset("tap", Family::Percussive, Recipe::Percussive(percussive::TAP)),
    // Sustained with vibrato
    preset("whistle", Family::Vibrato, Recipe::Vibrato(vibrato::WHISTLE)),
    preset("cat", Family::Vibrato, Recipe::Vibrato(vibrato::CAT)),
    preset("bird", Family::Vibrato, Recipe::Vibrato(vibrato::BIRD)),
    preset("cow", Family::Vibrato, Recipe::Vibrato(vibrato::COW)),
    preset("owl", Family::Vibrato, Recipe::Vibrato(vibrato::OWL)),
    // Harmonic
    preset("bell", Family::Harmonic, Recipe::Harmonic(harmonic::BELL)),
    preset("chime", Family::Harmonic, Recipe::Harmonic(harmonic::CHIME)),
    preset("piano", Family::Harmonic, Recipe::Harmonic(harmonic::PIANO)),
    preset("xylophone", Family::Harmonic, Recipe::Harmonic(harmonic::XYLOPHONE)),
    preset("doorbell", Family::Harmonic, Recipe::Harmonic(harmonic::DOORBELL)),
    // Noise textures
    preset("airplane", Family::Texture, Recipe::Texture(texture::AIRPLANE)),
    preset("whoosh", Family::Texture, Recipe::Texture(texture::WHOOSH)),
    preset("wind", Family::Texture, Recipe::Texture(texture::WIND)),
    preset("splash", Family::Texture, Recipe::Texture(texture::SPLASH)),
    // Swarms
    preset("applause", Family::Swarm, Recipe::Swarm(swarm::APPLAUSE)),
    preset("rain", Family::Swarm, Recipe::Swarm(swarm::RAIN)),
    // Calls
    preset("dog", Family::Call, Recipe::Call(calls::DOG)),
    preset("siren", Family::Call, Recipe::Call(calls::SIREN)),
    preset("car-horn", Family::Call, Recipe::Call(calls::CAR_HORN)),
    preset("duck", Family::Call, Recipe::Call(calls::DUCK)),
    preset("phone", Family::Call, Recipe::Call(calls::PHONE)),
    preset("success", Family::Call, Recipe::Call(calls::SUCCESS)),
    preset("error", Family::Call, Recipe::Call(calls::ERROR)),
    // Fallback
    preset(DEFAULT_PRESET, Family::Default, Recipe::Tone(DEFAULT_TONE)),
];

const DEFAULT_TONE: Tone = Tone {
    waveform: Waveform::Sine,
    frequency: 440.0,
    duration: 0.3,
    attack: 0.005,
    gain: 0.5,
};

pub fn lookup(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

pub fn default_preset() -> &'static Preset {
    // The table always ends with the default tone.
    &PRESETS[PRESETS.len() - 1]
}

pub fn ids() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.id)
}
