use std::{fmt, io::Cursor, sync::Arc};

use symphonia::core::{
    audio::SampleBuffer,
    codecs::{DecoderOptions, CODEC_TYPE_NULL},
    errors::Error as SymphoniaError,
    formats::FormatOptions,
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};
use tracing::debug;

use crate::error::DecodeError;

/// Immutable mono PCM shared by every playback of one asset.
#[derive(Clone)]
pub struct DecodedBuffer {
    pub samples: Arc<[f32]>,
    pub sample_rate: u32,
}

impl DecodedBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
        }
    }

    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Returns the memory size in bytes.
    pub fn memory_size(&self) -> usize {
        self.samples.len() * std::mem::size_of::<f32>()
    }
}

impl fmt::Debug for DecodedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedBuffer")
            .field("frames", &self.frames())
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

/// Decode an in-memory file to mono at `target_rate`.
///
/// `extension` is only a hint; the container is probed from the bytes.
pub fn decode(
    bytes: Vec<u8>,
    extension: Option<&str>,
    target_rate: u32,
) -> Result<DecodedBuffer, DecodeError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = extension {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;
    let track_id = track.id;
    let source_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut mono = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(err)) => {
                // Corrupt packet: skip it and keep going
                debug!(err, "skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count().max(1);
        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);

        mono.extend(
            buffer
                .samples()
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        );
    }

    if mono.is_empty() {
        return Err(DecodeError::Empty);
    }

    if source_rate == target_rate {
        return Ok(DecodedBuffer::new(mono, source_rate));
    }

    debug!(source_rate, target_rate, "resampling asset");
    Ok(DecodedBuffer::new(
        resample(&mono, source_rate, target_rate),
        target_rate,
    ))
}

/// Linear-interpolation resampling of a mono signal.
pub fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    let ratio = target_rate as f64 / source_rate as f64;
    let target_frames = (samples.len() as f64 * ratio).ceil() as usize;

    (0..target_frames)
        .map(|frame| {
            let source_pos = frame as f64 / ratio;
            let index = source_pos.floor() as usize;
            let frac = source_pos.fract() as f32;

            let s0 = samples.get(index).copied().unwrap_or(0.0);
            let s1 = samples.get(index + 1).copied().unwrap_or(s0);
            s0 + (s1 - s0) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(channels: u16, sample_rate: u32, frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..frames {
                for ch in 0..channels {
                    // Left carries a ramp, right carries its negation
                    let value = (i % 100) as i16 * 100;
                    writer
                        .write_sample(if ch == 0 { value } else { -value })
                        .unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_wav_at_native_rate() {
        let buffer = decode(wav_bytes(1, 48_000, 4_800), Some("wav"), 48_000).unwrap();
        assert_eq!(buffer.sample_rate, 48_000);
        assert_eq!(buffer.frames(), 4_800);
        assert!((buffer.duration() - 0.1).abs() < 1e-9);
        assert_eq!(buffer.memory_size(), 4_800 * 4);
    }

    #[test]
    fn stereo_is_downmixed() {
        // Opposite channels cancel out
        let buffer = decode(wav_bytes(2, 44_100, 1_000), Some("wav"), 44_100).unwrap();
        assert_eq!(buffer.frames(), 1_000);
        assert!(buffer.samples.iter().all(|s| s.abs() < 1e-6));
    }

    #[test]
    fn resamples_to_device_rate() {
        let buffer = decode(wav_bytes(1, 24_000, 2_400), Some("wav"), 48_000).unwrap();
        assert_eq!(buffer.sample_rate, 48_000);
        assert_eq!(buffer.frames(), 4_800);
    }

    #[test]
    fn garbage_is_an_error() {
        let result = decode(b"definitely not audio".to_vec(), Some("mp3"), 48_000);
        assert!(result.is_err());
    }

    #[test]
    fn resample_interpolates() {
        let out = resample(&[0.0, 1.0, 2.0], 1, 2);
        assert_eq!(out.len(), 6);
        assert_eq!(&out[..5], &[0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(out[5], 2.0);
    }
}
