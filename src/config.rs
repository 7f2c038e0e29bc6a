use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::{device::OutputConfig, error::ConfigError, synth::volume::Volume};

const DEFAULT_VOLUME: f32 = 0.6;

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

/// A YAML representation of the cue engine configuration.
///
/// ```yaml
/// default_volume: 0.5
/// asset_root: /usr/share/app
/// remember_failed_loads: true
/// output:
///   device: "USB Audio"
///   buffer_frames: 256
/// ```
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CueConfig {
    /// Volume used by the default-volume entry point.
    #[serde(default = "default_volume")]
    default_volume: f32,

    /// Directory that asset paths resolve against.
    #[serde(default)]
    asset_root: Option<PathBuf>,

    /// Stop refetching assets that failed to load once.
    #[serde(default)]
    remember_failed_loads: bool,

    #[serde(default)]
    output: OutputConfig,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            default_volume: DEFAULT_VOLUME,
            asset_root: None,
            remember_failed_loads: false,
            output: OutputConfig::default(),
        }
    }
}

impl CueConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from_str(yaml, FileFormat::Yaml)))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from(path)))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let parsed: CueConfig = builder.build()?.try_deserialize()?;
        if !(0.0..=1.0).contains(&parsed.default_volume) {
            return Err(ConfigError::Volume(parsed.default_volume));
        }
        Ok(parsed)
    }

    pub fn default_volume(&self) -> Volume {
        Volume::new(self.default_volume)
    }

    pub fn asset_root(&self) -> Option<&Path> {
        self.asset_root.as_deref()
    }

    pub fn remember_failed_loads(&self) -> bool {
        self.remember_failed_loads
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = CueConfig::from_yaml("{}").unwrap();
        assert_eq!(config, CueConfig::default());
        assert_eq!(config.default_volume().get(), 0.6);
        assert!(!config.remember_failed_loads());
        assert!(config.output().device.is_none());
    }

    #[test]
    fn yaml_overrides() {
        let yaml = "\
default_volume: 0.25
asset_root: /srv/cues
remember_failed_loads: true
output:
  device: \"Built-in Output\"
  buffer_frames: 256
";
        let config = CueConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.default_volume().get(), 0.25);
        assert_eq!(config.asset_root(), Some(Path::new("/srv/cues")));
        assert!(config.remember_failed_loads());
        assert_eq!(config.output().device.as_deref(), Some("Built-in Output"));
        assert_eq!(config.output().buffer_frames, Some(256));
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let result = CueConfig::from_yaml("default_volume: 1.5");
        assert!(matches!(result, Err(ConfigError::Volume(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cues.yaml");
        std::fs::write(&path, "remember_failed_loads: true\n").unwrap();

        let config = CueConfig::from_file(&path).unwrap();
        assert!(config.remember_failed_loads());
    }
}
