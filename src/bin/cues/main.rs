//! cues - play, inspect and bounce audio cues from the command line
//!
//! Run with: cargo run -- play bell

use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use clap::{crate_version, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use audio_cues::{
    presets, AssetCache, AudioCues, AudioDevice, CueConfig, DirFetcher, MemoryFetcher,
    SynthesisEngine, Volume,
};

/// Extra time to let the output drain after a cue ends.
const TAIL: Duration = Duration::from_millis(150);

#[derive(Parser)]
#[clap(version = crate_version!(), about = "Audio feedback cues with synthesized fallbacks.")]
struct Cli {
    /// Path to a YAML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists every synthesis preset.
    List {},
    /// Synthesizes a preset through the audio output.
    Play {
        /// Preset id, e.g. bell or applause.
        preset: String,
        /// Volume between 0 and 1.
        #[arg(short, long)]
        volume: Option<f32>,
    },
    /// Plays a clip, synthesizing the fallback preset if it cannot be loaded.
    Asset {
        /// Asset path, e.g. /sounds/match/bell.mp3.
        path: String,
        /// Preset played when the clip is unavailable.
        fallback: String,
        /// Directory asset paths resolve against.
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Volume between 0 and 1.
        #[arg(short, long)]
        volume: Option<f32>,
    },
    /// Renders a preset offline to a WAV file.
    Bounce {
        /// Preset id.
        preset: String,
        /// Output WAV path.
        output: PathBuf,
        /// Volume between 0 and 1.
        #[arg(short, long)]
        volume: Option<f32>,
        /// Sample rate of the rendered file.
        #[arg(short, long, default_value_t = 48_000, value_parser = clap::value_parser!(u32).range(1..))]
        sample_rate: u32,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CueConfig::from_file(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => CueConfig::default(),
    };

    match cli.command {
        Commands::List {} => {
            println!("Presets (count: {}):", presets::PRESETS.len());
            for preset in presets::PRESETS {
                println!("- {:<10} {}", preset.id, preset.family.as_str());
            }
        }
        Commands::Play { preset, volume } => {
            let volume = volume.map(Volume::new).unwrap_or(config.default_volume());
            let cues = AudioCues::from_config(&config);
            if !cues.device().is_available() {
                return Err(eyre!("no audio output available"));
            }

            // Swarm timing is random per render; the window bounds it
            let duration = SynthesisEngine::new().render(&preset, volume, 0.0).duration();
            cues.play_synthesized(&preset, volume.get());
            wait(duration);
        }
        Commands::Asset {
            path,
            fallback,
            root,
            volume,
        } => {
            let volume = volume.map(Volume::new).unwrap_or(config.default_volume());
            let root = root
                .or_else(|| config.asset_root().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));
            let cache = AssetCache::new(DirFetcher::new(root))
                .remember_failures(config.remember_failed_loads());
            let cues = AudioCues::new(AudioDevice::output(config.output().clone()), cache);
            if !cues.device().is_available() {
                return Err(eyre!("no audio output available"));
            }

            let duration = match cues.load_audio(&path) {
                Some(buffer) => buffer.duration(),
                None => SynthesisEngine::new().render(&fallback, volume, 0.0).duration(),
            };
            let playback = cues.play_audio_with_fallback(&path, &fallback, volume.get());
            if playback.used_real_asset() {
                println!("Playing {}", path);
            } else {
                println!("{} unavailable, synthesized {}", path, fallback);
            }
            wait(duration);
        }
        Commands::Bounce {
            preset,
            output,
            volume,
            sample_rate,
        } => {
            let volume = volume.map(Volume::new).unwrap_or(config.default_volume());
            bounce(&preset, &output, volume, sample_rate)?;
        }
    }

    Ok(())
}

fn wait(seconds: f64) {
    thread::sleep(Duration::from_secs_f64(seconds.max(0.0)) + TAIL);
}

/// Render one preset on an offline device and write it as 32-bit float WAV.
fn bounce(preset: &str, output: &Path, volume: Volume, sample_rate: u32) -> Result<()> {
    let cues = AudioCues::new(
        AudioDevice::offline(sample_rate as f32),
        AssetCache::new(MemoryFetcher::new()),
    );
    cues.play_synthesized(preset, volume.get());

    let end = cues
        .device()
        .scheduled()
        .iter()
        .flat_map(|record| record.voices.iter().map(|v| v.stop))
        .fold(0.0, f64::max);
    let frames = ((end + TAIL.as_secs_f64()) * sample_rate as f64).ceil() as usize;
    let samples = cues.device().render(frames);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(output, spec)
        .wrap_err_with(|| format!("failed to create {}", output.display()))?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    println!(
        "Wrote {} ({:.2}s at {} Hz)",
        output.display(),
        frames as f64 / sample_rate as f64,
        sample_rate
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_reports_package_version() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn bounce_rejects_zero_sample_rate() {
        let parsed = Cli::try_parse_from(["cues", "bounce", "bell", "out.wav", "--sample-rate", "0"]);
        assert!(parsed.is_err());
    }
}
