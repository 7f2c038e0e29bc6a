//! Error types. None of these escape the playback entry points: a failed
//! asset load falls back to synthesis, an unavailable device makes playback
//! a no-op.

/// Failure to fetch the raw bytes of an asset.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset request for {path} failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to turn fetched bytes into PCM.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Audio file error: {0}")]
    Symphonia(#[from] symphonia::core::errors::Error),

    #[error("No decodable audio track")]
    NoTrack,

    #[error("Track does not declare a sample rate")]
    UnknownSampleRate,

    #[error("Decoded audio is empty")]
    Empty,
}

/// Failure of either half of an asset load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failure to open the realtime output.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("No output device found: {0}")]
    NoOutputDevice(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[cfg(feature = "cpal")]
    #[error("Unable to list output devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[cfg(feature = "cpal")]
    #[error("Unable to read output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "cpal")]
    #[error("Unable to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[cfg(feature = "cpal")]
    #[error("Unable to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("Output thread error: {0}")]
    Thread(String),
}

/// Typed error for config load/parse failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config load/parse error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid default volume {0}: expected a value in [0, 1]")]
    Volume(f32),
}
