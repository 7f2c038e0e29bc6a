//! Noise textures.
//!
//! White noise through a state-variable filter whose cutoff moves
//! exponentially across the cue. Opening a lowpass sounds like something
//! approaching (airplane); a falling lowpass sounds like spray settling
//! (splash); a resonant bandpass hovering low sounds like wind.

use rand::Rng;

use crate::{
    dsp::{curve::ParamCurve, filter::FilterType},
    synth::voice::{FilterSpec, VoiceSpec},
};

#[derive(Debug, Clone, Copy)]
pub struct Texture {
    pub filter: FilterType,
    pub cutoff_from: f32,
    pub cutoff_to: f32,
    pub resonance: f32,
    pub duration: f64,
    pub attack: f64,
    pub release: f64,
    pub gain: f32,
}

impl Texture {
    pub fn voices<R: Rng + ?Sized>(&self, volume: f32, now: f64, rng: &mut R) -> Vec<VoiceSpec> {
        let end = now + self.duration;
        let cutoff = ParamCurve::starting_at(self.cutoff_from, now).exponential_to(self.cutoff_to, end);
        let gain = ParamCurve::swell(self.gain * volume, now, self.attack, self.release, end);

        vec![VoiceSpec::noise(rng.gen(), gain, now, end).with_filter(FilterSpec {
            kind: self.filter,
            cutoff,
            resonance: self.resonance,
        })]
    }
}

pub const AIRPLANE: Texture = Texture {
    filter: FilterType::LowPass,
    cutoff_from: 350.0,
    cutoff_to: 1200.0,
    resonance: 0.2,
    duration: 2.0,
    attack: 0.4,
    release: 0.6,
    gain: 0.35,
};

pub const WHOOSH: Texture = Texture {
    filter: FilterType::BandPass,
    cutoff_from: 400.0,
    cutoff_to: 3200.0,
    resonance: 0.3,
    duration: 0.5,
    attack: 0.15,
    release: 0.25,
    gain: 0.5,
};

pub const WIND: Texture = Texture {
    filter: FilterType::BandPass,
    cutoff_from: 250.0,
    cutoff_to: 700.0,
    resonance: 0.5,
    duration: 1.6,
    attack: 0.5,
    release: 0.6,
    gain: 0.3,
};

pub const SPLASH: Texture = Texture {
    filter: FilterType::LowPass,
    cutoff_from: 4000.0,
    cutoff_to: 600.0,
    resonance: 0.1,
    duration: 0.45,
    attack: 0.005,
    release: 0.35,
    gain: 0.5,
};
