//! Swarms of tiny noise bursts.
//!
//! Applause and rain are not one sound but dozens: short filtered noise
//! bursts at random times and random levels inside a fixed window. Each
//! burst gets its own noise seed.
//!
//! The last burst is pinned to end exactly at the window's edge, so every
//! render lasts the same time no matter how the others fall.

use rand::Rng;

use crate::{
    dsp::{curve::ParamCurve, filter::FilterType},
    synth::voice::{FilterSpec, VoiceSpec},
};

const BURST_ATTACK: f64 = 0.002;

#[derive(Debug, Clone, Copy)]
pub struct Swarm {
    pub count: usize,
    /// Every burst starts and ends inside `[now, now + window]`.
    pub window: f64,
    pub burst_min: f64,
    pub burst_max: f64,
    pub gain_min: f32,
    pub gain_max: f32,
    pub filter: FilterType,
    pub cutoff: f32,
    pub resonance: f32,
}

impl Swarm {
    pub fn voices<R: Rng + ?Sized>(&self, volume: f32, now: f64, rng: &mut R) -> Vec<VoiceSpec> {
        (0..self.count)
            .map(|i| {
                let length = rng.gen_range(self.burst_min..=self.burst_max);
                let offset = if i + 1 == self.count {
                    self.window - length
                } else {
                    rng.gen_range(0.0..=self.window - length)
                };
                let peak = rng.gen_range(self.gain_min..=self.gain_max) * volume;

                let start = now + offset;
                let end = start + length;
                VoiceSpec::noise(
                    rng.gen(),
                    ParamCurve::decay(peak, start, BURST_ATTACK, end),
                    start,
                    end,
                )
                .with_filter(FilterSpec::fixed(self.filter, self.cutoff, self.resonance))
            })
            .collect()
    }
}

pub const APPLAUSE: Swarm = Swarm {
    count: 20,
    window: 1.0,
    burst_min: 0.03,
    burst_max: 0.07,
    gain_min: 0.3,
    gain_max: 0.8,
    filter: FilterType::BandPass,
    cutoff: 1400.0,
    resonance: 0.3,
};

pub const RAIN: Swarm = Swarm {
    count: 28,
    window: 1.5,
    burst_min: 0.01,
    burst_max: 0.03,
    gain_min: 0.1,
    gain_max: 0.35,
    filter: FilterType::HighPass,
    cutoff: 2500.0,
    resonance: 0.1,
};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn bursts_stay_inside_window() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let voices = APPLAUSE.voices(0.6, 3.0, &mut rng);
            assert_eq!(voices.len(), 20);
            for v in &voices {
                assert!(v.start >= 3.0);
                assert!(v.stop <= 4.0 + 1e-9);
                assert!(v.duration() <= 0.08);
            }
        }
    }

    #[test]
    fn last_burst_closes_window() {
        let mut rng = StdRng::seed_from_u64(4);
        let voices = RAIN.voices(0.6, 0.0, &mut rng);
        let end = voices.iter().map(|v| v.stop).fold(0.0, f64::max);
        assert!((end - 1.5).abs() < 1e-9);
    }
}
