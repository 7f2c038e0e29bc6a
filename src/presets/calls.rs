//! Calls: short sequences of oscillator bursts.
//!
//! A bark is two sawtooth bursts a quarter second apart, each falling in
//! pitch; a phone ring is four sine bursts alternating between two tones.
//! Each burst has its own pitch ramp and envelope and is offset from the
//! start of the cue by tens to hundreds of milliseconds.

use crate::{
    dsp::{curve::ParamCurve, filter::FilterType, oscillator::Waveform},
    synth::voice::{FilterSpec, VoiceSpec},
};

#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub offset: f64,
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration: f64,
    pub gain: f32,
    pub attack: f64,
    pub release: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Calls {
    pub waveform: Waveform,
    pub lowpass: Option<f32>,
    pub bursts: &'static [Burst],
}

impl Calls {
    pub fn voices(&self, volume: f32, now: f64) -> Vec<VoiceSpec> {
        self.bursts
            .iter()
            .map(|burst| {
                let start = now + burst.offset;
                let end = start + burst.duration;
                let frequency = if burst.start_hz == burst.end_hz {
                    ParamCurve::constant(burst.start_hz)
                } else {
                    ParamCurve::starting_at(burst.start_hz, start).exponential_to(burst.end_hz, end)
                };
                let gain = ParamCurve::swell(
                    burst.gain * volume,
                    start,
                    burst.attack,
                    burst.release,
                    end,
                );

                let voice = VoiceSpec::oscillator(self.waveform, frequency, gain, start, end);
                match self.lowpass {
                    Some(cutoff) => {
                        voice.with_filter(FilterSpec::fixed(FilterType::LowPass, cutoff, 0.0))
                    }
                    None => voice,
                }
            })
            .collect()
    }
}

const fn burst(
    offset: f64,
    start_hz: f32,
    end_hz: f32,
    duration: f64,
    gain: f32,
    attack: f64,
    release: f64,
) -> Burst {
    Burst {
        offset,
        start_hz,
        end_hz,
        duration,
        gain,
        attack,
        release,
    }
}

pub const DOG: Calls = Calls {
    waveform: Waveform::Sawtooth,
    lowpass: Some(1200.0),
    bursts: &[
        burst(0.0, 420.0, 260.0, 0.16, 0.5, 0.01, 0.12),
        burst(0.24, 400.0, 250.0, 0.14, 0.45, 0.01, 0.1),
    ],
};

pub const SIREN: Calls = Calls {
    waveform: Waveform::Triangle,
    lowpass: None,
    bursts: &[
        burst(0.0, 650.0, 950.0, 0.4, 0.4, 0.02, 0.05),
        burst(0.4, 950.0, 650.0, 0.4, 0.4, 0.02, 0.05),
        burst(0.8, 650.0, 950.0, 0.4, 0.4, 0.02, 0.05),
        burst(1.2, 950.0, 650.0, 0.4, 0.4, 0.02, 0.05),
    ],
};

pub const CAR_HORN: Calls = Calls {
    waveform: Waveform::Square,
    lowpass: Some(2000.0),
    bursts: &[
        burst(0.0, 349.23, 349.23, 0.5, 0.3, 0.01, 0.08),
        burst(0.02, 440.0, 440.0, 0.5, 0.3, 0.01, 0.08),
    ],
};

pub const DUCK: Calls = Calls {
    waveform: Waveform::Sawtooth,
    lowpass: Some(1500.0),
    bursts: &[
        burst(0.0, 320.0, 220.0, 0.12, 0.45, 0.005, 0.09),
        burst(0.18, 300.0, 200.0, 0.12, 0.4, 0.005, 0.09),
    ],
};

pub const PHONE: Calls = Calls {
    waveform: Waveform::Sine,
    lowpass: None,
    bursts: &[
        burst(0.0, 1000.0, 1000.0, 0.09, 0.35, 0.005, 0.02),
        burst(0.1, 1250.0, 1250.0, 0.09, 0.35, 0.005, 0.02),
        burst(0.2, 1000.0, 1000.0, 0.09, 0.35, 0.005, 0.02),
        burst(0.3, 1250.0, 1250.0, 0.09, 0.35, 0.005, 0.02),
    ],
};

pub const SUCCESS: Calls = Calls {
    waveform: Waveform::Sine,
    lowpass: None,
    bursts: &[
        burst(0.0, 523.25, 523.25, 0.25, 0.4, 0.005, 0.2),
        burst(0.09, 659.25, 659.25, 0.25, 0.4, 0.005, 0.2),
        burst(0.18, 783.99, 783.99, 0.25, 0.4, 0.005, 0.2),
    ],
};

pub const ERROR: Calls = Calls {
    waveform: Waveform::Square,
    lowpass: Some(1200.0),
    bursts: &[
        burst(0.0, 220.0, 196.0, 0.16, 0.3, 0.005, 0.1),
        burst(0.2, 185.0, 165.0, 0.22, 0.3, 0.005, 0.1),
    ],
};
