use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc, Arc,
    },
    thread,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::{
    device::{
        mixer::{Mixer, MixerCommand, MixerQueue},
        OutputConfig,
    },
    error::DeviceError,
    MAX_BLOCK_SIZE,
};

enum Control {
    Resume,
    Shutdown,
}

/// Realtime output. The stream lives on its own thread because
/// `cpal::Stream` is not `Send` on every platform; the mixer lives inside
/// the stream callback.
pub(crate) struct CpalOutput {
    sample_rate: f32,
    clock: Arc<AtomicU64>,
    queue: Mutex<MixerQueue>,
    control: Mutex<mpsc::Sender<Control>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl CpalOutput {
    pub fn open(config: &OutputConfig) -> Result<Self, DeviceError> {
        let clock = Arc::new(AtomicU64::new(0));
        let (control_tx, control_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread = {
            let config = config.clone();
            let clock = clock.clone();
            thread::Builder::new()
                .name("audio-cues-output".into())
                .spawn(move || {
                    let stream = match build_stream(&config, clock) {
                        Ok((stream, sample_rate, queue)) => {
                            let _ = ready_tx.send(Ok((sample_rate, queue)));
                            stream
                        }
                        Err(err) => {
                            let _ = ready_tx.send(Err(err));
                            return;
                        }
                    };

                    // Keep the stream alive until shutdown or until the
                    // device is dropped.
                    while let Ok(Control::Resume) = control_rx.recv() {
                        if let Err(err) = stream.play() {
                            warn!(err = %err, "failed to resume output stream");
                        }
                    }
                })
                .map_err(|err| DeviceError::Thread(err.to_string()))?
        };

        let (sample_rate, queue) = ready_rx
            .recv()
            .map_err(|_| DeviceError::Thread("output thread exited during setup".into()))??;

        info!(sample_rate, "audio output opened");
        Ok(Self {
            sample_rate,
            clock,
            queue: Mutex::new(queue),
            control: Mutex::new(control_tx),
            thread: Some(thread),
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn current_time(&self) -> f64 {
        self.clock.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    /// Ask the output thread to (re)start the stream. Safe to call often.
    ///
    /// Also drops the nodes the mixer has retired since the last call.
    pub fn resume(&self) {
        self.queue.lock().collect();
        let _ = self.control.lock().send(Control::Resume);
    }

    pub fn send(&self, command: MixerCommand) -> bool {
        self.queue.lock().send(command)
    }
}

impl Drop for CpalOutput {
    fn drop(&mut self) {
        let _ = self.control.lock().send(Control::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("audio output thread panicked");
            }
        }
    }
}

fn find_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device, DeviceError> {
    let device = match name {
        Some(name) => host
            .output_devices()?
            .find(|d| d.name().map(|n| n.trim() == name).unwrap_or(false)),
        None => host.default_output_device(),
    };
    device.ok_or_else(|| DeviceError::NoOutputDevice(name.unwrap_or("default").to_string()))
}

fn build_stream(
    config: &OutputConfig,
    clock: Arc<AtomicU64>,
) -> Result<(cpal::Stream, f32, MixerQueue), DeviceError> {
    let host = cpal::default_host();
    let device = find_device(&host, config.device.as_deref())?;
    let supported = device.default_output_config()?;

    let sample_rate = supported.sample_rate().0 as f32;
    let channels = supported.channels() as usize;
    let stream_config = cpal::StreamConfig {
        channels: supported.channels(),
        sample_rate: supported.sample_rate(),
        buffer_size: match config.buffer_frames {
            Some(frames) => cpal::BufferSize::Fixed(frames),
            None => cpal::BufferSize::Default,
        },
    };

    let (mixer, queue) = Mixer::new(sample_rate, clock);
    let stream = match supported.sample_format() {
        cpal::SampleFormat::F32 => build::<f32>(&device, &stream_config, channels, mixer)?,
        cpal::SampleFormat::I16 => build::<i16>(&device, &stream_config, channels, mixer)?,
        cpal::SampleFormat::U16 => build::<u16>(&device, &stream_config, channels, mixer)?,
        other => return Err(DeviceError::UnsupportedFormat(format!("{other:?}"))),
    };
    stream.play()?;

    Ok((stream, sample_rate, queue))
}

/// Build a stream that renders the mono mix and copies it to every channel.
fn build<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut mixer: Mixer,
) -> Result<cpal::Stream, DeviceError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let mut scratch = vec![0.0f32; MAX_BLOCK_SIZE];
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                let frames = chunk.len() / channels;
                let mono = &mut scratch[..frames];
                mixer.render_block(mono);

                for (frame, &sample) in chunk.chunks_mut(channels).zip(mono.iter()) {
                    let value = T::from_sample(sample.clamp(-1.0, 1.0));
                    frame.fill(value);
                }
            }
        },
        |err| error!(err = %err, "output stream error"),
        None,
    )?;
    Ok(stream)
}
