//! Sustained cues with vibrato.
//!
//! A carrier glides between two pitches while a sine LFO is summed into its
//! frequency. Rate and depth give each animal its character: a bird trills
//! fast and wide, a cow wobbles slow and narrow under a dark lowpass.

use crate::{
    dsp::{curve::ParamCurve, filter::FilterType, oscillator::Waveform},
    synth::voice::{FilterSpec, LfoSpec, VoiceSpec},
};

#[derive(Debug, Clone, Copy)]
pub struct Vibrato {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    pub glide: f64,
    pub lfo_hz: f32,
    pub depth_hz: f32,
    pub attack: f64,
    pub release: f64,
    pub duration: f64,
    pub gain: f32,
    pub lowpass: Option<f32>,
}

impl Vibrato {
    pub fn voices(&self, volume: f32, now: f64) -> Vec<VoiceSpec> {
        let end = now + self.duration;
        let frequency =
            ParamCurve::starting_at(self.start_hz, now).exponential_to(self.end_hz, now + self.glide);
        let gain = ParamCurve::swell(self.gain * volume, now, self.attack, self.release, end);

        let voice = VoiceSpec::oscillator(self.waveform, frequency, gain, now, end).with_vibrato(
            LfoSpec {
                waveform: Waveform::Sine,
                rate_hz: self.lfo_hz,
                depth_hz: self.depth_hz,
            },
        );
        let voice = match self.lowpass {
            Some(cutoff) => voice.with_filter(FilterSpec::fixed(FilterType::LowPass, cutoff, 0.1)),
            None => voice,
        };
        vec![voice]
    }
}

pub const WHISTLE: Vibrato = Vibrato {
    waveform: Waveform::Sine,
    start_hz: 1800.0,
    end_hz: 2100.0,
    glide: 0.5,
    lfo_hz: 6.0,
    depth_hz: 45.0,
    attack: 0.05,
    release: 0.15,
    duration: 0.7,
    gain: 0.4,
    lowpass: None,
};

pub const CAT: Vibrato = Vibrato {
    waveform: Waveform::Sawtooth,
    start_hz: 650.0,
    end_hz: 480.0,
    glide: 0.5,
    lfo_hz: 5.5,
    depth_hz: 25.0,
    attack: 0.08,
    release: 0.2,
    duration: 0.6,
    gain: 0.35,
    lowpass: Some(1800.0),
};

pub const BIRD: Vibrato = Vibrato {
    waveform: Waveform::Sine,
    start_hz: 2800.0,
    end_hz: 3600.0,
    glide: 0.25,
    lfo_hz: 14.0,
    depth_hz: 250.0,
    attack: 0.02,
    release: 0.1,
    duration: 0.35,
    gain: 0.35,
    lowpass: None,
};

pub const COW: Vibrato = Vibrato {
    waveform: Waveform::Sawtooth,
    start_hz: 160.0,
    end_hz: 115.0,
    glide: 1.0,
    lfo_hz: 4.0,
    depth_hz: 6.0,
    attack: 0.15,
    release: 0.3,
    duration: 1.2,
    gain: 0.5,
    lowpass: Some(700.0),
};

pub const OWL: Vibrato = Vibrato {
    waveform: Waveform::Sine,
    start_hz: 420.0,
    end_hz: 360.0,
    glide: 0.6,
    lfo_hz: 3.0,
    depth_hz: 10.0,
    attack: 0.1,
    release: 0.25,
    duration: 0.8,
    gain: 0.5,
    lowpass: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::voice::SourceSpec;

    #[test]
    fn carrier_has_lfo_on_frequency() {
        let voices = BIRD.voices(0.6, 0.0);
        let SourceSpec::Oscillator { vibrato, .. } = &voices[0].source else {
            panic!("bird should be an oscillator");
        };
        let lfo = vibrato.expect("bird has vibrato");
        assert_eq!(lfo.rate_hz, 14.0);
        assert_eq!(lfo.depth_hz, 250.0);
    }

    #[test]
    fn gain_holds_between_attack_and_release() {
        let voices = COW.voices(1.0, 0.0);
        let gain = &voices[0].gain;
        assert!((gain.value_at(0.5) - 0.5).abs() < 1e-6);
        assert!(gain.value_at(1.1) < 0.5);
        assert_eq!(voices[0].stop, 1.2);
    }
}
