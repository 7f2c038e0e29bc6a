use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    device::{PlaybackHandle, PlaybackNode},
    graph::node::RenderCtx,
    MAX_BLOCK_SIZE,
};

/// Messages from scheduling threads to the realtime side.
pub(crate) enum MixerCommand {
    Play(PlaybackNode),
    Stop(PlaybackHandle),
}

/// Capacity of the schedule queue, in commands.
pub(crate) const COMMAND_QUEUE_SIZE: usize = 256;

/// Most playback nodes the mixer holds at once. Further `Play` commands wait
/// in the queue until a node retires.
pub(crate) const NODE_CAPACITY: usize = 64;

/*
Mixer
=====

The realtime half of the device. Every block it:

1. drains the command queue (new nodes, early stops)
2. renders each voice over the part of the block it overlaps
3. sums the voices into the output
4. hands nodes whose voices have all ended back to the scheduling side
5. advances the device clock

  block:        |------------- out.len() -------------|
  frame0                                              frame0 + len
  voice A:   [=========]                                         (ends mid-block)
  voice B:                     [===========================...   (starts mid-block)

A voice whose start frame already passed (scheduled a little late) starts at
the top of the next block instead of being skipped.

The audio thread never allocates or frees. The node list is allocated once
at NODE_CAPACITY, and retired nodes (boxed graphs, scratch and noise buffers)
travel back through a second ring to be dropped by `MixerQueue`:

  scheduler ──[MixerCommand]──→ Mixer
  scheduler ←──[PlaybackNode]── Mixer   (retired)
*/

pub(crate) struct Mixer {
    rx: Consumer<MixerCommand>,
    retired: Producer<PlaybackNode>,
    nodes: Vec<PlaybackNode>,
    temp_buffer: Vec<f32>,
    clock: Arc<AtomicU64>,
    sample_rate: f32,
}

/// Scheduling-side ends of the mixer's two rings.
pub(crate) struct MixerQueue {
    tx: Producer<MixerCommand>,
    retired: Consumer<PlaybackNode>,
}

impl MixerQueue {
    /// Queue a command. Returns `false` when the queue is full.
    pub fn send(&mut self, command: MixerCommand) -> bool {
        self.collect();
        self.tx.push(command).is_ok()
    }

    /// Drop nodes the mixer has finished with. Returns how many were dropped.
    pub fn collect(&mut self) -> usize {
        let mut dropped = 0;
        while let Ok(node) = self.retired.pop() {
            drop(node);
            dropped += 1;
        }
        dropped
    }
}

impl Mixer {
    pub fn new(sample_rate: f32, clock: Arc<AtomicU64>) -> (Self, MixerQueue) {
        let (tx, rx) = RingBuffer::new(COMMAND_QUEUE_SIZE);
        let (retired_tx, retired_rx) = RingBuffer::new(NODE_CAPACITY);
        let mixer = Self {
            rx,
            retired: retired_tx,
            nodes: Vec::with_capacity(NODE_CAPACITY),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            clock,
            sample_rate,
        };
        let queue = MixerQueue {
            tx,
            retired: retired_rx,
        };
        (mixer, queue)
    }

    /// Render any number of frames, in blocks of at most `MAX_BLOCK_SIZE`.
    pub fn render(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(chunk);
        }
    }

    /// Render one block. `out.len()` must not exceed `MAX_BLOCK_SIZE`.
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        let frame0 = self.clock.load(Ordering::Acquire);
        let frame_end = frame0 + out.len() as u64;
        self.drain_commands(frame0);

        out.fill(0.0);
        let ctx = RenderCtx::new(self.sample_rate, frame0 as f64 / self.sample_rate as f64);

        for node in &mut self.nodes {
            for voice in &mut node.voices {
                let from = voice.start_frame.max(frame0);
                let to = voice.stop_frame.min(frame_end);
                if from >= to || !voice.node.is_active() {
                    continue;
                }

                let offset = (from - frame0) as usize;
                let len = (to - from) as usize;
                let temp = &mut self.temp_buffer[..len];
                temp.fill(0.0);
                voice.node.render_block(temp, &ctx.advanced(offset));

                for (o, v) in out[offset..offset + len].iter_mut().zip(temp.iter()) {
                    *o += v;
                }
            }
        }

        self.retire_finished(frame_end);
        self.clock.store(frame_end, Ordering::Release);
    }

    fn drain_commands(&mut self, frame0: u64) {
        while let Ok(command) = self.rx.peek() {
            if matches!(command, MixerCommand::Play(_)) && self.nodes.len() >= NODE_CAPACITY {
                break;
            }
            match self.rx.pop() {
                Ok(MixerCommand::Play(node)) => self.nodes.push(node),
                Ok(MixerCommand::Stop(handle)) => {
                    // Ending every voice now retires the node below
                    for node in self.nodes.iter_mut().filter(|n| n.handle == handle) {
                        for voice in &mut node.voices {
                            voice.stop_frame = voice.stop_frame.min(frame0);
                        }
                    }
                }
                Err(_) => break,
            }
        }
    }

    fn retire_finished(&mut self, frame_end: u64) {
        let mut i = 0;
        while i < self.nodes.len() {
            let finished = self.nodes[i]
                .voices
                .iter()
                .all(|v| v.stop_frame <= frame_end || !v.node.is_active());

            // A full return ring keeps the (silent) node until the next block
            if finished && !self.retired.is_full() {
                let node = self.nodes.swap_remove(i);
                if let Err(rtrb::PushError::Full(node)) = self.retired.push(node) {
                    self.nodes.push(node);
                    return;
                }
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        device::ScheduledVoice,
        dsp::{curve::ParamCurve, oscillator::Waveform},
        synth::voice::VoiceSpec,
    };

    const SR: f32 = 1_000.0;

    fn mixer() -> (Mixer, MixerQueue, Arc<AtomicU64>) {
        let clock = Arc::new(AtomicU64::new(0));
        let (mixer, queue) = Mixer::new(SR, clock.clone());
        (mixer, queue, clock)
    }

    fn dc_voice(level: f32, start: f64, stop: f64) -> ScheduledVoice {
        // A square at 0 Hz holds +1, so the output is just the gain
        let spec = VoiceSpec::oscillator(
            Waveform::Square,
            ParamCurve::constant(0.0),
            ParamCurve::constant(level),
            start,
            stop,
        );
        ScheduledVoice::new(&spec, SR)
    }

    fn node(handle: u64, voices: Vec<ScheduledVoice>) -> PlaybackNode {
        PlaybackNode {
            handle: PlaybackHandle(handle),
            voices,
        }
    }

    #[test]
    fn voices_start_and_stop_on_their_frames() {
        let (mut mixer, mut queue, clock) = mixer();
        assert!(queue.send(MixerCommand::Play(node(1, vec![dc_voice(0.5, 0.010, 0.020)]))));

        let mut out = vec![0.0f32; 32];
        mixer.render(&mut out);

        assert!(out[..10].iter().all(|&s| s == 0.0));
        assert!(out[10..20].iter().all(|&s| (s - 0.5).abs() < 1e-6));
        assert!(out[20..].iter().all(|&s| s == 0.0));
        assert_eq!(clock.load(Ordering::Acquire), 32);

        assert!(mixer.nodes.is_empty());
        assert_eq!(queue.collect(), 1, "finished node is handed back");
    }

    #[test]
    fn overlapping_voices_sum() {
        let (mut mixer, mut queue, _) = mixer();
        let voices = vec![dc_voice(0.25, 0.0, 0.016), dc_voice(0.25, 0.008, 0.016)];
        assert!(queue.send(MixerCommand::Play(node(1, voices))));

        let mut out = vec![0.0f32; 16];
        mixer.render(&mut out);
        assert!((out[4] - 0.25).abs() < 1e-6);
        assert!((out[12] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn late_voice_still_starts() {
        let (mut mixer, mut queue, _) = mixer();
        let mut out = vec![0.0f32; 64];
        mixer.render(&mut out);

        // Scheduled for t = 0.010 but the clock is already at 0.064
        assert!(queue.send(MixerCommand::Play(node(2, vec![dc_voice(1.0, 0.010, 0.100)]))));
        mixer.render(&mut out);
        assert!(out[..36].iter().all(|&s| (s - 1.0).abs() < 1e-6));
        assert!(out[36..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn stop_retires_node() {
        let (mut mixer, mut queue, _) = mixer();
        assert!(queue.send(MixerCommand::Play(node(3, vec![dc_voice(1.0, 0.0, 10.0)]))));
        let mut out = vec![0.0f32; 8];
        mixer.render(&mut out);
        assert_eq!(mixer.nodes.len(), 1);

        assert!(queue.send(MixerCommand::Stop(PlaybackHandle(3))));
        mixer.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(mixer.nodes.is_empty());
        assert_eq!(queue.collect(), 1);
    }

    #[test]
    fn node_list_never_grows_past_capacity() {
        let (mut mixer, mut queue, _) = mixer();
        for handle in 0..100 {
            let voices = vec![dc_voice(0.001, 0.0, 0.050)];
            assert!(queue.send(MixerCommand::Play(node(handle, voices))));
        }

        let capacity = mixer.nodes.capacity();
        let mut out = vec![0.0f32; 16];
        mixer.render_block(&mut out);
        assert_eq!(mixer.nodes.len(), NODE_CAPACITY);
        assert_eq!(mixer.nodes.capacity(), capacity, "node list reallocated");

        // The overflow waits in the queue and is admitted once the first
        // wave retires
        let mut rest = vec![0.0f32; 64];
        mixer.render(&mut rest);
        assert_eq!(queue.collect(), NODE_CAPACITY);
        mixer.render_block(&mut out);
        assert_eq!(queue.collect(), 100 - NODE_CAPACITY);
        assert_eq!(mixer.nodes.capacity(), capacity);
    }

    #[test]
    fn full_return_ring_defers_retirement() {
        let (mut mixer, mut queue, _) = mixer();
        let mut out = vec![0.0f32; 8];

        // Fill the return ring without collecting it
        for wave in 0..2u64 {
            for i in 0..NODE_CAPACITY as u64 {
                let voices = vec![dc_voice(0.5, 0.0, 0.001)];
                assert!(queue.tx.push(MixerCommand::Play(node(wave * 100 + i, voices))).is_ok());
            }
            mixer.render_block(&mut out);
        }

        // First wave is in the ring, second wave waits in the mixer
        assert_eq!(mixer.nodes.len(), NODE_CAPACITY);
        assert!(out.iter().all(|&s| s == 0.0), "finished nodes stay silent");

        assert_eq!(queue.collect(), NODE_CAPACITY);
        mixer.render_block(&mut out);
        assert!(mixer.nodes.is_empty());
        assert_eq!(queue.collect(), NODE_CAPACITY);
    }
}
