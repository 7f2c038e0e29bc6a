use crate::dsp::curve::ParamCurve;
use crate::dsp::oscillator::{OscillatorBlock, Waveform};
use crate::graph::lfo::LfoNode;
use crate::graph::node::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Audio Oscillator
================

An oscillator is the fundamental sound source of every synthesized cue. It
generates a repeating waveform at a frequency given by a ParamCurve, so the
pitch can sweep (a falling "pop", a rising whistle) with sample accuracy.

Waveform Types and Their Character:
-----------------------------------

Sine: The purest tone - a single frequency with no harmonics.
  - Use: pops, boops, bell partials, whistles

Sawtooth: The richest waveform - contains all harmonics (1/n).
  - Use: animal calls (bark, meow, moo), buzzy cues

Square: Hollow but powerful - odd harmonics only (1/n).
  - Use: horns, error buzzes, clicks

Triangle: Mellow - odd harmonics falling off as 1/n².
  - Use: soft percussive knocks, piano-like partials

Vibrato
-------
An LFO can be summed into the frequency parameter:

    frequency(t) = curve(t) + lfo(t) × depth_hz

This happens per sample, so the carrier and the LFO never drift apart.

Example usage:
  // Whistle: 1.8 kHz carrier with a 6 Hz, ±45 Hz vibrato
  let whistle = OscNode::new(Waveform::Sine, ParamCurve::constant(1800.0))
      .with_vibrato(LfoNode::sine(6.0), 45.0);

  // Pop: pitch falls exponentially from 900 Hz to 150 Hz in 80 ms
  let pop = OscNode::new(
      Waveform::Sine,
      ParamCurve::starting_at(900.0, t0).exponential_to(150.0, t0 + 0.08),
  );
*/

pub struct OscNode {
    osc: OscillatorBlock,
    frequency: ParamCurve,
    vibrato: Option<Vibrato>,
    freq_buffer: Vec<f32>,
}

struct Vibrato {
    lfo: LfoNode,
    depth_hz: f32,
    buffer: Vec<f32>,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: ParamCurve) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            frequency,
            vibrato: None,
            freq_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn sine(frequency_hz: f32) -> Self {
        Self::new(Waveform::Sine, ParamCurve::constant(frequency_hz))
    }

    pub fn sawtooth(frequency_hz: f32) -> Self {
        Self::new(Waveform::Sawtooth, ParamCurve::constant(frequency_hz))
    }

    pub fn square(frequency_hz: f32) -> Self {
        Self::new(Waveform::Square, ParamCurve::constant(frequency_hz))
    }

    pub fn triangle(frequency_hz: f32) -> Self {
        Self::new(Waveform::Triangle, ParamCurve::constant(frequency_hz))
    }

    /// Sum an LFO, scaled by `depth_hz`, into the frequency parameter.
    pub fn with_vibrato(mut self, lfo: LfoNode, depth_hz: f32) -> Self {
        self.vibrato = Some(Vibrato {
            lfo,
            depth_hz,
            buffer: vec![0.0; MAX_BLOCK_SIZE],
        });
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len();
        let freqs = &mut self.freq_buffer[..len];
        self.frequency.fill(freqs, ctx.time, ctx.sample_period());

        if let Some(vibrato) = &mut self.vibrato {
            let lfo = &mut vibrato.buffer[..len];
            vibrato.lfo.render_block(lfo, ctx);
            for (f, m) in freqs.iter_mut().zip(lfo.iter()) {
                *f += m * vibrato.depth_hz;
            }
        }

        let nyquist = ctx.sample_rate * 0.5;
        for f in freqs.iter_mut() {
            *f = f.max(0.0).min(nyquist);
        }

        self.osc.render(out, freqs, ctx.sample_rate);
    }
}
