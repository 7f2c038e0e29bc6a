//! Percussive cues.
//!
//! A single oscillator whose pitch drops exponentially while its gain decays
//! exponentially to the curve floor. The sweep gives the "punch": a pop
//! falls from a bright 900 Hz to 150 Hz in 80 ms, a drum from 160 Hz to
//! 45 Hz over a quarter second.
//!
//! # Variations
//!
//! - Longer decay = boomy drum
//! - Higher start pitch = more "click" in the attack
//! - Square or triangle source plus a lowpass = woody click/knock

use crate::{
    dsp::{
        curve::ParamCurve,
        filter::FilterType,
        oscillator::Waveform,
    },
    synth::voice::{FilterSpec, VoiceSpec},
};

/// Attack of every percussive hit, just long enough to avoid a click.
const ATTACK: f64 = 0.002;

#[derive(Debug, Clone, Copy)]
pub struct Percussive {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds for the pitch to reach `end_hz`.
    pub sweep: f64,
    /// Seconds until the gain reaches the floor.
    pub decay: f64,
    pub gain: f32,
    pub lowpass: Option<f32>,
}

impl Percussive {
    pub fn voices(&self, volume: f32, now: f64) -> Vec<VoiceSpec> {
        let end = now + self.decay;
        let frequency =
            ParamCurve::starting_at(self.start_hz, now).exponential_to(self.end_hz, now + self.sweep);
        let gain = ParamCurve::decay(self.gain * volume, now, ATTACK, end);

        let voice = VoiceSpec::oscillator(self.waveform, frequency, gain, now, end);
        let voice = match self.lowpass {
            Some(cutoff) => voice.with_filter(FilterSpec::fixed(FilterType::LowPass, cutoff, 0.0)),
            None => voice,
        };
        vec![voice]
    }
}

pub const POP: Percussive = Percussive {
    waveform: Waveform::Sine,
    start_hz: 900.0,
    end_hz: 150.0,
    sweep: 0.08,
    decay: 0.12,
    gain: 0.8,
    lowpass: None,
};

pub const BOOP: Percussive = Percussive {
    waveform: Waveform::Sine,
    start_hz: 520.0,
    end_hz: 260.0,
    sweep: 0.12,
    decay: 0.18,
    gain: 0.7,
    lowpass: None,
};

pub const DRUM: Percussive = Percussive {
    waveform: Waveform::Sine,
    start_hz: 160.0,
    end_hz: 45.0,
    sweep: 0.25,
    decay: 0.45,
    gain: 1.0,
    lowpass: None,
};

pub const CLICK: Percussive = Percussive {
    waveform: Waveform::Square,
    start_hz: 2200.0,
    end_hz: 1400.0,
    sweep: 0.02,
    decay: 0.035,
    gain: 0.35,
    lowpass: Some(5000.0),
};

pub const KNOCK: Percussive = Percussive {
    waveform: Waveform::Triangle,
    start_hz: 320.0,
    end_hz: 110.0,
    sweep: 0.06,
    decay: 0.14,
    gain: 0.9,
    lowpass: None,
};

pub const TAP: Percussive = Percussive {
    waveform: Waveform::Sine,
    start_hz: 1400.0,
    end_hz: 700.0,
    sweep: 0.03,
    decay: 0.06,
    gain: 0.6,
    lowpass: None,
};
