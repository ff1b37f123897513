//! Default configuration constants for voskpipe.
//!
//! Shared constants used across configuration, audio reading, and the
//! recognizer so the same values are not duplicated in several places.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition; the stock Vosk English
/// models are trained at this rate. Input at any other rate produces garbage
/// or silence from the recognizer, not an error.
pub const SAMPLE_RATE: u32 = 16000;

/// Bytes of audio submitted to the recognizer per iteration.
///
/// 4000 bytes of 16-bit mono PCM at 16kHz is 125ms of audio: small enough
/// for responsive partial results, large enough to keep per-call overhead low.
pub const CHUNK_BYTES: usize = 4000;

/// Bytes per PCM sample (16-bit little-endian).
pub const BYTES_PER_SAMPLE: usize = 2;

/// Default Vosk model directory.
///
/// The small English model: ~40MB, fast enough for real-time streaming on
/// modest hardware. Download from https://alphacephei.com/vosk/models and
/// unpack next to the working directory, or point `stt.model` elsewhere.
pub const DEFAULT_MODEL: &str = "vosk-model-small-en-us-0.15";

/// Report the recognizer backend compiled into this build.
///
/// Returns "Vosk" when the `vosk` feature is enabled, "none (stub)" for
/// builds without a real engine (mock-only, used for tests and CI).
pub fn recognizer_backend() -> &'static str {
    if cfg!(feature = "vosk") {
        "Vosk"
    } else {
        "none (stub)"
    }
}
