//! Vosk-based streaming speech recognition.
//!
//! This module provides a Vosk implementation of the StreamingRecognizer
//! trait using the vosk crate (Kaldi under the hood).
//!
//! # Feature Gate
//!
//! This module requires the `vosk` feature to be enabled and libvosk to be
//! available at link time. To build with Vosk support:
//!
//! ```bash
//! cargo build --release
//! ```

use crate::defaults;
use crate::error::{Result, VoskpipeError};
use crate::stt::recognizer::{DecodeOutcome, StreamingRecognizer};
use std::path::PathBuf;

#[cfg(feature = "vosk")]
use vosk::{DecodingState, Model, Recognizer};

/// Configuration for the Vosk recognizer.
#[derive(Debug, Clone)]
pub struct VoskConfig {
    /// Path to the Vosk model directory
    pub model_path: PathBuf,
    /// Sample rate the input audio is delivered at, in Hz
    pub sample_rate: u32,
}

impl Default for VoskConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(defaults::DEFAULT_MODEL),
            sample_rate: defaults::SAMPLE_RATE,
        }
    }
}

/// Vosk-based recognizer implementation.
///
/// Wraps a stateful Kaldi recognizer that accumulates audio across calls and
/// reports utterance boundaries.
///
/// # Feature Gate
///
/// This type is only functional when the `vosk` feature is enabled.
#[cfg(feature = "vosk")]
pub struct VoskRecognizer {
    recognizer: Recognizer,
    config: VoskConfig,
    model_name: String,
}

#[cfg(feature = "vosk")]
impl std::fmt::Debug for VoskRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoskRecognizer")
            .field("config", &self.config)
            .field("model_name", &self.model_name)
            .field("recognizer", &"<Recognizer>")
            .finish()
    }
}

/// Vosk recognizer placeholder (without vosk feature).
///
/// This is a stub implementation that returns errors when used.
/// Enable the `vosk` feature to use real recognition.
#[cfg(not(feature = "vosk"))]
#[derive(Debug)]
pub struct VoskRecognizer {
    model_name: String,
}

fn model_name_from_path(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(feature = "vosk")]
impl VoskRecognizer {
    /// Create a new Vosk recognizer.
    ///
    /// # Errors
    /// Returns `VoskpipeError::ModelNotFound` if the model directory doesn't exist
    /// Returns `VoskpipeError::ModelLoad` if the model fails to load
    pub fn new(config: VoskConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(VoskpipeError::ModelNotFound {
                path: config.model_path.display().to_string(),
            });
        }

        let model_name = model_name_from_path(&config.model_path);

        let path_str = config
            .model_path
            .to_str()
            .ok_or_else(|| VoskpipeError::ModelLoad {
                message: "Invalid UTF-8 in model path".to_string(),
            })?;
        let model = Model::new(path_str).ok_or_else(|| VoskpipeError::ModelLoad {
            message: format!("Vosk could not load model at {}", path_str),
        })?;

        let recognizer = Recognizer::new(&model, config.sample_rate as f32).ok_or_else(|| {
            VoskpipeError::ModelLoad {
                message: format!(
                    "Vosk could not create a recognizer for model '{}' at {} Hz",
                    model_name, config.sample_rate
                ),
            }
        })?;

        Ok(Self {
            recognizer,
            config,
            model_name,
        })
    }
}

#[cfg(not(feature = "vosk"))]
impl VoskRecognizer {
    /// Create a new Vosk recognizer (stub implementation).
    ///
    /// Model path validation still applies so startup errors match the real
    /// backend; any recognition call fails with a build-configuration error.
    pub fn new(config: VoskConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(VoskpipeError::ModelNotFound {
                path: config.model_path.display().to_string(),
            });
        }

        let model_name = model_name_from_path(&config.model_path);

        Ok(Self { model_name })
    }
}

#[cfg(feature = "vosk")]
impl StreamingRecognizer for VoskRecognizer {
    fn accept_chunk(&mut self, samples: &[i16]) -> Result<DecodeOutcome> {
        let state = self.recognizer.accept_waveform(samples).map_err(|e| {
            VoskpipeError::Recognizer {
                message: format!("Vosk rejected waveform: {:?}", e),
            }
        })?;

        match state {
            DecodingState::Finalized => Ok(DecodeOutcome::Finalized),
            DecodingState::Running => Ok(DecodeOutcome::Decoding),
            DecodingState::Failed => Err(VoskpipeError::Recognizer {
                message: "Vosk decoding failed".to_string(),
            }),
        }
    }

    fn final_text(&mut self) -> Result<String> {
        // With alternatives disabled (the default), the result is Single.
        Ok(self
            .recognizer
            .result()
            .single()
            .map(|r| r.text.to_string())
            .unwrap_or_default())
    }

    fn partial_text(&mut self) -> Result<String> {
        Ok(self.recognizer.partial_result().partial.to_string())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(not(feature = "vosk"))]
impl StreamingRecognizer for VoskRecognizer {
    fn accept_chunk(&mut self, _samples: &[i16]) -> Result<DecodeOutcome> {
        Err(VoskpipeError::Recognizer {
            message: concat!(
                "Vosk feature not enabled. This binary was built without speech recognition.\n",
                "To fix: cargo build --release (vosk is enabled by default)\n",
                "If linking fails, install libvosk and set LIBRARY_PATH to its location"
            )
            .to_string(),
        })
    }

    fn final_text(&mut self) -> Result<String> {
        Ok(String::new())
    }

    fn partial_text(&mut self) -> Result<String> {
        Ok(String::new())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_vosk_config_default() {
        let config = VoskConfig::default();
        assert_eq!(config.model_path, PathBuf::from(defaults::DEFAULT_MODEL));
        assert_eq!(config.sample_rate, defaults::SAMPLE_RATE);
    }

    #[test]
    fn test_new_with_missing_model_returns_model_not_found() {
        let config = VoskConfig {
            model_path: PathBuf::from("/nonexistent/vosk-model-xyz"),
            sample_rate: 16000,
        };

        let result = VoskRecognizer::new(config);
        match result {
            Err(VoskpipeError::ModelNotFound { path }) => {
                assert_eq!(path, "/nonexistent/vosk-model-xyz");
            }
            _ => panic!("Expected ModelNotFound error"),
        }
    }

    #[test]
    fn test_model_name_from_path() {
        assert_eq!(
            model_name_from_path(Path::new("/opt/models/vosk-model-small-en-us-0.15")),
            "vosk-model-small-en-us-0.15"
        );
        assert_eq!(model_name_from_path(Path::new("/")), "unknown");
    }

    #[cfg(not(feature = "vosk"))]
    #[test]
    fn test_stub_accept_chunk_reports_missing_feature() {
        let dir = tempfile::tempdir().unwrap();
        let config = VoskConfig {
            model_path: dir.path().to_path_buf(),
            sample_rate: 16000,
        };

        let mut rec = VoskRecognizer::new(config).unwrap();
        let err = rec.accept_chunk(&[0; 100]).unwrap_err();
        assert!(err.to_string().contains("Vosk feature not enabled"));
    }
}
