use std::sync::Arc;

use serde::Serialize;

use crate::{
    assets::DecodedBuffer,
    dsp::{
        curve::ParamCurve,
        filter::FilterType,
        noise::white_noise,
        oscillator::{OscillatorBlock, Waveform},
    },
    graph::{
        envelope::EnvNode, extensions::NodeExt, filter::FilterNode, lfo::LfoNode,
        node::GraphNode, oscillator::OscNode, sample::SampleNode,
    },
};

/// What kind of source a voice plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceKind {
    Oscillator,
    Noise,
    Buffer,
}

/// Vibrato applied to an oscillator's frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LfoSpec {
    pub waveform: Waveform,
    pub rate_hz: f32,
    pub depth_hz: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterType,
    pub cutoff: ParamCurve,
    pub resonance: f32,
}

impl FilterSpec {
    pub fn fixed(kind: FilterType, cutoff_hz: f32, resonance: f32) -> Self {
        Self {
            kind,
            cutoff: ParamCurve::constant(cutoff_hz),
            resonance,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SourceSpec {
    Oscillator {
        waveform: Waveform,
        frequency: ParamCurve,
        vibrato: Option<LfoSpec>,
    },
    /// White noise, generated at build time from `seed`.
    Noise { seed: u64 },
    Buffer { buffer: Arc<DecodedBuffer> },
}

/// One scheduled primitive: source, optional filter and gain envelope,
/// bounded by absolute device-clock times.
#[derive(Debug, Clone)]
pub struct VoiceSpec {
    pub source: SourceSpec,
    pub filter: Option<FilterSpec>,
    pub gain: ParamCurve,
    pub start: f64,
    pub stop: f64,
}

impl VoiceSpec {
    pub fn oscillator(
        waveform: Waveform,
        frequency: ParamCurve,
        gain: ParamCurve,
        start: f64,
        stop: f64,
    ) -> Self {
        Self {
            source: SourceSpec::Oscillator {
                waveform,
                frequency,
                vibrato: None,
            },
            filter: None,
            gain,
            start,
            stop,
        }
    }

    pub fn noise(seed: u64, gain: ParamCurve, start: f64, stop: f64) -> Self {
        Self {
            source: SourceSpec::Noise { seed },
            filter: None,
            gain,
            start,
            stop,
        }
    }

    /// Play a decoded clip once at constant `gain`, for its full length.
    pub fn buffer(buffer: Arc<DecodedBuffer>, gain: f32, start: f64) -> Self {
        let stop = start + buffer.duration();
        Self {
            source: SourceSpec::Buffer { buffer },
            filter: None,
            gain: ParamCurve::starting_at(gain, start),
            start,
            stop,
        }
    }

    pub fn with_vibrato(mut self, lfo: LfoSpec) -> Self {
        if let SourceSpec::Oscillator { vibrato, .. } = &mut self.source {
            *vibrato = Some(lfo);
        }
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn kind(&self) -> VoiceKind {
        match self.source {
            SourceSpec::Oscillator { .. } => VoiceKind::Oscillator,
            SourceSpec::Noise { .. } => VoiceKind::Noise,
            SourceSpec::Buffer { .. } => VoiceKind::Buffer,
        }
    }

    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    /// Build the realtime graph for this voice.
    ///
    /// Allocates (noise generation, node buffers), so this runs on the
    /// scheduling thread, never on the audio callback.
    pub fn build(&self, sample_rate: f32) -> Box<dyn GraphNode> {
        let source: Box<dyn GraphNode> = match &self.source {
            SourceSpec::Oscillator {
                waveform,
                frequency,
                vibrato,
            } => {
                let osc = OscNode::new(*waveform, frequency.clone());
                match vibrato {
                    Some(lfo) => osc
                        .with_vibrato(
                            LfoNode::new(OscillatorBlock::new(lfo.waveform), lfo.rate_hz),
                            lfo.depth_hz,
                        )
                        .boxed(),
                    None => osc.boxed(),
                }
            }
            SourceSpec::Noise { seed } => {
                let rate = sample_rate.round() as u32;
                let frames = (self.duration().max(0.0) * rate as f64).ceil() as usize + 1;
                SampleNode::new(white_noise(frames, *seed).into(), rate, self.start).boxed()
            }
            SourceSpec::Buffer { buffer } => {
                SampleNode::new(buffer.samples.clone(), buffer.sample_rate, self.start).boxed()
            }
        };

        let shaped = match &self.filter {
            Some(filter) => source
                .through(FilterNode::new(filter.kind, filter.cutoff.clone(), filter.resonance))
                .boxed(),
            None => source,
        };

        shaped.amplify(EnvNode::new(self.gain.clone())).boxed()
    }
}
