//! Harmonic cues: bells, chimes and struck bars.
//!
//! Each strike is a stack of partials at integer multiples of a base
//! frequency. Partial `n` starts at `gain / n` and decays faster than the
//! one below it, so the tone darkens as it rings out:
//!
//! ```text
//!   partial   frequency   peak        decay
//!   1         f           g           d
//!   2         2f          g/2         d/1.5
//!   3         3f          g/3         d/2
//!   4         4f          g/4         d/2.5
//! ```
//!
//! The doorbell is two strikes, a major third apart, 400 ms apart.

use crate::{
    dsp::{curve::ParamCurve, oscillator::Waveform},
    synth::voice::VoiceSpec,
};

const ATTACK: f64 = 0.002;

#[derive(Debug, Clone, Copy)]
pub struct Strike {
    /// Seconds after the cue starts.
    pub offset: f64,
    pub base_hz: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Harmonic {
    pub waveform: Waveform,
    pub strikes: &'static [Strike],
    pub partials: usize,
    /// Decay of the fundamental, in seconds.
    pub decay: f64,
    pub gain: f32,
}

impl Harmonic {
    pub fn voices(&self, volume: f32, now: f64) -> Vec<VoiceSpec> {
        let mut voices = Vec::with_capacity(self.strikes.len() * self.partials);
        for strike in self.strikes {
            let start = now + strike.offset;
            for n in 1..=self.partials {
                let harmonic = n as f32;
                let decay = self.decay / (1.0 + 0.5 * (n - 1) as f64);
                let end = start + decay;
                voices.push(VoiceSpec::oscillator(
                    self.waveform,
                    ParamCurve::constant(strike.base_hz * harmonic),
                    ParamCurve::decay(self.gain / harmonic * volume, start, ATTACK, end),
                    start,
                    end,
                ));
            }
        }
        voices
    }
}

pub const BELL: Harmonic = Harmonic {
    waveform: Waveform::Sine,
    strikes: &[Strike {
        offset: 0.0,
        base_hz: 880.0,
    }],
    partials: 4,
    decay: 1.6,
    gain: 0.5,
};

pub const CHIME: Harmonic = Harmonic {
    waveform: Waveform::Sine,
    strikes: &[Strike {
        offset: 0.0,
        base_hz: 1320.0,
    }],
    partials: 3,
    decay: 1.2,
    gain: 0.4,
};

pub const PIANO: Harmonic = Harmonic {
    waveform: Waveform::Triangle,
    strikes: &[Strike {
        offset: 0.0,
        base_hz: 261.63,
    }],
    partials: 4,
    decay: 1.0,
    gain: 0.5,
};

pub const XYLOPHONE: Harmonic = Harmonic {
    waveform: Waveform::Sine,
    strikes: &[Strike {
        offset: 0.0,
        base_hz: 784.0,
    }],
    partials: 3,
    decay: 0.4,
    gain: 0.6,
};

pub const DOORBELL: Harmonic = Harmonic {
    waveform: Waveform::Sine,
    strikes: &[
        Strike {
            offset: 0.0,
            base_hz: 659.25,
        },
        Strike {
            offset: 0.4,
            base_hz: 523.25,
        },
    ],
    partials: 3,
    decay: 1.0,
    gain: 0.45,
};
