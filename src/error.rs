//! Error types for voskpipe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoskpipeError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Model errors
    #[error("Speech model not found at {path}")]
    ModelNotFound { path: String },

    #[error("Failed to load speech model: {message}")]
    ModelLoad { message: String },

    // Recognizer errors
    #[error("Recognizer error: {message}")]
    Recognizer { message: String },

    // Audio input errors
    #[error("Invalid audio input: {message}")]
    InvalidAudio { message: String },

    // Input stream and general I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VoskpipeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = VoskpipeError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = VoskpipeError::ConfigInvalidValue {
            key: "stream.chunk_bytes".to_string(),
            message: "must be even".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for stream.chunk_bytes: must be even"
        );
    }

    #[test]
    fn test_model_not_found_display() {
        let error = VoskpipeError::ModelNotFound {
            path: "vosk-model-small-en-us-0.15".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Speech model not found at vosk-model-small-en-us-0.15"
        );
    }

    #[test]
    fn test_model_load_display() {
        let error = VoskpipeError::ModelLoad {
            message: "corrupt model directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to load speech model: corrupt model directory"
        );
    }

    #[test]
    fn test_recognizer_display() {
        let error = VoskpipeError::Recognizer {
            message: "decoder rejected waveform".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Recognizer error: decoder rejected waveform"
        );
    }

    #[test]
    fn test_invalid_audio_display() {
        let error = VoskpipeError::InvalidAudio {
            message: "not a WAV stream".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid audio input: not a WAV stream");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let error: VoskpipeError = io_error.into();
        assert!(matches!(error, VoskpipeError::Io(_)));
        assert!(error.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_toml_error_from_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not [ valid").unwrap_err();
        let error: VoskpipeError = toml_error.into();
        assert!(matches!(error, VoskpipeError::Config(_)));
    }

    #[test]
    fn test_other_display() {
        let error = VoskpipeError::Other("something went wrong".to_string());
        assert_eq!(error.to_string(), "something went wrong");
    }
}
