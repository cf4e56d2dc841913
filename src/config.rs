//! Configuration: load settings and an optional custom kit from
//! `~/.drum-machine/config.yaml`.
//!
//! Every field is optional. A missing default file yields the defaults; an
//! explicit `--config` path that cannot be read or parsed is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::kit::{
    default_kit, RegistryError, SampleDescriptor, SampleRegistry, SampleSource, SynthVoice,
    TriggerKey,
};
use crate::machine::{Volume, DEFAULT_REPLAY_INTERVAL};
use crate::tui::theme::ThemeMode;

/// Seed for synthesized voices when none is configured.
pub const DEFAULT_SEED: u64 = 42;

const SYNTH_PREFIX: &str = "synth:";

/// Errors from loading or interpreting the config file.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    InvalidKey(String),
    UnknownVoice(String),
    Registry(RegistryError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
            ConfigError::InvalidKey(key) => {
                write!(f, "pad key {key:?} must be a single printable character")
            }
            ConfigError::UnknownVoice(name) => write!(
                f,
                "unknown synth voice {name:?} (expected one of: {})",
                SynthVoice::ALL
                    .iter()
                    .map(|v| v.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            ConfigError::Registry(e) => write!(f, "invalid kit: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Registry(e) => Some(e),
            ConfigError::InvalidKey(_) | ConfigError::UnknownVoice(_) => None,
        }
    }
}

impl From<RegistryError> for ConfigError {
    fn from(e: RegistryError) -> Self {
        ConfigError::Registry(e)
    }
}

/// One pad in a custom kit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PadConfig {
    pub key: String,
    pub label: String,
    /// `synth:<voice>` or a WAV path, relative to the config file.
    pub source: String,
}

/// Parsed config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub volume: Option<f32>,
    pub replay_interval_ms: Option<u64>,
    pub theme: Option<ThemeMode>,
    pub seed: Option<u64>,
    pub pads: Option<Vec<PadConfig>>,
    /// Directory the file was loaded from; relative WAV paths resolve here.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Application directory under the user's home.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".drum-machine"))
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.yaml"))
}

impl Config {
    /// Load from `explicit`, or from the default location if `None`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse YAML text. An empty document is the default config.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn volume(&self) -> Volume {
        self.volume.map(Volume::from_slider).unwrap_or_default()
    }

    pub fn replay_interval(&self) -> Duration {
        self.replay_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REPLAY_INTERVAL)
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.unwrap_or_default()
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Build the kit: the configured pads, or the default kit if none are set.
    pub fn registry(&self) -> Result<SampleRegistry, ConfigError> {
        let Some(pads) = &self.pads else {
            return Ok(default_kit());
        };
        let descriptors = pads
            .iter()
            .map(|pad| self.descriptor(pad))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SampleRegistry::new(descriptors)?)
    }

    fn descriptor(&self, pad: &PadConfig) -> Result<SampleDescriptor, ConfigError> {
        let key =
            TriggerKey::parse(&pad.key).ok_or_else(|| ConfigError::InvalidKey(pad.key.clone()))?;
        let source = self.source(&pad.source)?;
        Ok(SampleDescriptor::new(key, pad.label.clone(), source))
    }

    fn source(&self, raw: &str) -> Result<SampleSource, ConfigError> {
        let raw = raw.trim();
        if let Some(name) = raw.strip_prefix(SYNTH_PREFIX) {
            return SynthVoice::from_name(name.trim())
                .map(SampleSource::Synth)
                .ok_or_else(|| ConfigError::UnknownVoice(name.trim().to_string()));
        }
        let path = PathBuf::from(raw);
        let resolved = match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        };
        Ok(SampleSource::File(resolved))
    }
}
