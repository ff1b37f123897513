//! voskpipe - Streaming speech-to-text from standard input.
//!
//! Reads raw PCM (or WAV) audio from stdin, feeds it to a Vosk recognizer in
//! fixed-size chunks, and prints partial and final transcripts to stdout, one
//! line per result, flushed immediately.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod stt;

// Core traits (source → process → sink)
pub use audio::reader::{ChunkReader, RawChunkReader};
pub use audio::wav::WavChunkReader;
pub use pipeline::sink::{CollectorSink, StdoutSink, TextSink};
pub use stt::recognizer::{DecodeOutcome, ScriptedRecognizer, StreamingRecognizer};
pub use stt::vosk::{VoskConfig, VoskRecognizer};

// The loop
pub use pipeline::alert::{AlertingSink, KeywordAlerter};
pub use pipeline::stream::{StreamSummary, run_stream};

// Error handling
pub use error::{Result, VoskpipeError};

// Config
pub use config::{AudioFormat, Config};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(
                ver.contains('+'),
                "With GIT_HASH set, version should contain '+', got: {}",
                ver
            );
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
