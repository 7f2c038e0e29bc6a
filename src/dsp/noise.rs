//! White noise buffers.
//!
//! Noise is generated on demand, once per voice, from a seed carried in the
//! render plan. The same seed always yields the same buffer, so plans stay
//! reproducible while every burst still sounds different.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generate `frames` samples of uniform white noise in [-1, 1).
pub fn white_noise(frames: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..frames).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
}
