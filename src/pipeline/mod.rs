//! The streaming transcription loop and its output seam.

pub mod alert;
pub mod sink;
pub mod stream;

pub use alert::{AlertingSink, KeywordAlerter};
pub use sink::{CollectorSink, StdoutSink, TextSink};
pub use stream::{StreamSummary, run_stream};
