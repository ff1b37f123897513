//! Speech recognition backends.

pub mod recognizer;
pub mod vosk;

pub use recognizer::{DecodeOutcome, ScriptedRecognizer, StreamingRecognizer};
pub use vosk::{VoskConfig, VoskRecognizer};
