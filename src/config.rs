use crate::defaults;
use crate::error::{Result, VoskpipeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub stt: SttConfig,
    pub stream: StreamConfig,
    pub alert: AlertConfig,
}

/// Audio input configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    /// Path to the Vosk model directory
    pub model: String,
}

/// Streaming loop configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// Bytes of audio per recognizer submission
    pub chunk_bytes: usize,
    /// Input container format
    pub format: AudioFormat,
}

/// Transcript keyword alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AlertConfig {
    /// Keywords that raise a stderr alert when they appear in a transcript
    /// line. Case-insensitive substring match. Empty list disables alerting.
    pub keywords: Vec<String>,
}

/// Input container format enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Raw little-endian 16-bit mono PCM
    Raw,
    /// WAV container (downmixed and resampled as needed)
    Wav,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_bytes: defaults::CHUNK_BYTES,
            format: AudioFormat::Raw,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VoskpipeError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                VoskpipeError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file is missing
    ///
    /// Invalid TOML is still an error; only a missing file falls back.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(VoskpipeError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOSKPIPE_MODEL → stt.model
    /// - VOSKPIPE_SAMPLE_RATE → audio.sample_rate
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("VOSKPIPE_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(rate) = std::env::var("VOSKPIPE_SAMPLE_RATE")
            && let Ok(rate) = rate.parse::<u32>()
            && rate > 0
        {
            self.audio.sample_rate = rate;
        }

        self
    }

    /// Validate values that serde cannot check structurally.
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(VoskpipeError::ConfigInvalidValue {
                key: "audio.sample_rate".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.stream.chunk_bytes == 0 {
            return Err(VoskpipeError::ConfigInvalidValue {
                key: "stream.chunk_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.stream.chunk_bytes % defaults::BYTES_PER_SAMPLE != 0 {
            return Err(VoskpipeError::ConfigInvalidValue {
                key: "stream.chunk_bytes".to_string(),
                message: "must be even (16-bit samples)".to_string(),
            });
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/voskpipe/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voskpipe")
            .join("config.toml")
    }

    /// Look up a configuration value by dotted key path (e.g. "stt.model").
    pub fn get_value_by_path(&self, key: &str) -> Result<String> {
        match key {
            "audio.sample_rate" => Ok(self.audio.sample_rate.to_string()),
            "stt.model" => Ok(self.stt.model.clone()),
            "stream.chunk_bytes" => Ok(self.stream.chunk_bytes.to_string()),
            "stream.format" => Ok(match self.stream.format {
                AudioFormat::Raw => "raw".to_string(),
                AudioFormat::Wav => "wav".to_string(),
            }),
            "alert.keywords" => Ok(self.alert.keywords.join(",")),
            _ => Err(VoskpipeError::ConfigInvalidValue {
                key: key.to_string(),
                message: "unknown configuration key".to_string(),
            }),
        }
    }

    /// Set a configuration value by dotted key path and persist the file.
    pub fn set_value_by_path(path: &Path, key: &str, value: &str) -> Result<()> {
        let mut config = Self::load_or_default(path)?;

        match key {
            "audio.sample_rate" => {
                config.audio.sample_rate =
                    value
                        .parse::<u32>()
                        .map_err(|e| VoskpipeError::ConfigInvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?;
            }
            "stt.model" => {
                config.stt.model = value.to_string();
            }
            "stream.chunk_bytes" => {
                config.stream.chunk_bytes =
                    value
                        .parse::<usize>()
                        .map_err(|e| VoskpipeError::ConfigInvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?;
            }
            "stream.format" => {
                config.stream.format = match value {
                    "raw" => AudioFormat::Raw,
                    "wav" => AudioFormat::Wav,
                    other => {
                        return Err(VoskpipeError::ConfigInvalidValue {
                            key: key.to_string(),
                            message: format!("expected 'raw' or 'wav', got '{}'", other),
                        });
                    }
                };
            }
            "alert.keywords" => {
                // Comma-separated list; blanks are dropped
                config.alert.keywords = value
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {
                return Err(VoskpipeError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "unknown configuration key".to_string(),
                });
            }
        }

        config.validate()?;
        config.save(path)
    }

    /// Persist this configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| VoskpipeError::Other(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Render the current configuration as display TOML.
    pub fn to_display_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| VoskpipeError::Other(format!("Failed to serialize config: {}", e)))
    }

    /// Dump a commented configuration template.
    pub fn dump_template() -> String {
        format!(
            "\
# voskpipe configuration
# Location: ~/.config/voskpipe/config.toml

[audio]
# Input sample rate in Hz. Must match the rate the model was trained at.
sample_rate = {sample_rate}

[stt]
# Path to the Vosk model directory.
model = \"{model}\"

[stream]
# Bytes of audio per recognizer submission (even, 16-bit samples).
chunk_bytes = {chunk_bytes}
# Input container format: \"raw\" (bare PCM) or \"wav\".
format = \"raw\"

[alert]
# Keywords that raise a stderr alert when they appear in a transcript line,
# e.g. [\"help\", \"fire\"]. Case-insensitive substring match; empty disables.
keywords = []
",
            sample_rate = defaults::SAMPLE_RATE,
            model = defaults::DEFAULT_MODEL,
            chunk_bytes = defaults::CHUNK_BYTES,
        )
    }
}
