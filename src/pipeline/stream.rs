//! The streaming transcription loop.
//!
//! A single synchronous cycle: read a fixed-size chunk → feed the recognizer
//! → conditionally emit a line → repeat until the input stream is exhausted.
//! Finalized utterances are always emitted; partial hypotheses are emitted
//! only when they change, so a downstream reader never sees the same partial
//! twice in a row.

use crate::audio::reader::ChunkReader;
use crate::error::Result;
use crate::pipeline::sink::TextSink;
use crate::stt::recognizer::{DecodeOutcome, StreamingRecognizer};

/// Loop state threaded through each iteration.
///
/// Holds the most recently emitted partial hypothesis so repeats can be
/// suppressed. Cleared whenever an utterance finalizes: the next utterance
/// starts with a clean slate even if its first partial happens to repeat the
/// previous utterance's last one.
#[derive(Debug, Clone, Default)]
struct StreamState {
    last_partial: String,
}

impl StreamState {
    fn new() -> Self {
        Self::default()
    }
}

/// What a single loop step emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emission {
    Final,
    Partial,
    Nothing,
}

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Chunks submitted to the recognizer
    pub chunks: u64,
    /// Partial hypothesis lines emitted
    pub partials: u64,
    /// Finalized utterance lines emitted
    pub finals: u64,
}

/// Process one decode outcome: fetch the matching result text and emit it if
/// the emission rules say so. Pure in (state, recognizer output) → (state,
/// optional line); all I/O goes through the sink.
fn step(
    state: &mut StreamState,
    recognizer: &mut dyn StreamingRecognizer,
    sink: &mut dyn TextSink,
    outcome: DecodeOutcome,
) -> Result<Emission> {
    match outcome {
        DecodeOutcome::Finalized => {
            let text = recognizer.final_text()?;
            // A finalized result closes the utterance; the dedup slot must
            // not leak into the next one.
            state.last_partial.clear();
            if text.is_empty() {
                return Ok(Emission::Nothing);
            }
            // Finals are never deduplicated: each represents a new utterance.
            sink.emit(&text)?;
            Ok(Emission::Final)
        }
        DecodeOutcome::Decoding => {
            let partial = recognizer.partial_text()?;
            if partial.is_empty() || partial == state.last_partial {
                return Ok(Emission::Nothing);
            }
            sink.emit(&partial)?;
            state.last_partial = partial;
            Ok(Emission::Partial)
        }
    }
}

/// Run the transcription loop until the reader is exhausted.
///
/// The sole termination condition is end of stream; any read, recognizer, or
/// sink failure aborts the run with the underlying error.
pub fn run_stream(
    reader: &mut dyn ChunkReader,
    recognizer: &mut dyn StreamingRecognizer,
    sink: &mut dyn TextSink,
) -> Result<StreamSummary> {
    let mut state = StreamState::new();
    let mut summary = StreamSummary::default();

    while let Some(chunk) = reader.next_chunk()? {
        let outcome = recognizer.accept_chunk(&chunk)?;
        summary.chunks += 1;

        match step(&mut state, recognizer, sink, outcome)? {
            Emission::Final => summary.finals += 1,
            Emission::Partial => summary.partials += 1,
            Emission::Nothing => {}
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::reader::RawChunkReader;
    use crate::pipeline::sink::CollectorSink;
    use crate::stt::recognizer::ScriptedRecognizer;
    use std::io::Cursor;

    fn run(
        input_bytes: usize,
        chunk_bytes: usize,
        mut recognizer: ScriptedRecognizer,
    ) -> (Vec<String>, StreamSummary) {
        let mut reader = RawChunkReader::new(Cursor::new(vec![0u8; input_bytes]), chunk_bytes);
        let mut sink = CollectorSink::new();
        let summary = run_stream(&mut reader, &mut recognizer, &mut sink).unwrap();
        (sink.into_lines(), summary)
    }

    #[test]
    fn test_single_partial_is_emitted() {
        // Scenario: one chunk, recognizer still decoding with partial "hello"
        let (lines, summary) = run(4000, 4000, ScriptedRecognizer::new("m").partial("hello"));

        assert_eq!(lines, ["hello"]);
        assert_eq!(summary.chunks, 1);
        assert_eq!(summary.partials, 1);
        assert_eq!(summary.finals, 0);
    }

    #[test]
    fn test_repeated_partial_is_suppressed() {
        // Scenario: two chunks both yielding partial "hello"
        let (lines, _) = run(
            8000,
            4000,
            ScriptedRecognizer::new("m").partial("hello").partial("hello"),
        );

        assert_eq!(lines, ["hello"]);
    }

    #[test]
    fn test_partial_then_final_emits_both() {
        // Scenario: partial "hel", then a finalized "hello"
        let (lines, summary) = run(
            8000,
            4000,
            ScriptedRecognizer::new("m").partial("hel").finalized("hello"),
        );

        assert_eq!(lines, ["hel", "hello"]);
        assert_eq!(summary.partials, 1);
        assert_eq!(summary.finals, 1);
    }

    #[test]
    fn test_empty_input_produces_no_output() {
        // Scenario: immediate end of stream
        let (lines, summary) = run(0, 4000, ScriptedRecognizer::new("m").partial("unused"));

        assert!(lines.is_empty());
        assert_eq!(summary.chunks, 0);
    }

    #[test]
    fn test_empty_final_is_skipped_and_loop_continues() {
        // Scenario: finalized with empty text, then a partial on the next chunk
        let (lines, summary) = run(
            8000,
            4000,
            ScriptedRecognizer::new("m").finalized("").partial("next"),
        );

        assert_eq!(lines, ["next"]);
        assert_eq!(summary.finals, 0);
        assert_eq!(summary.partials, 1);
    }

    #[test]
    fn test_empty_partials_are_suppressed() {
        let (lines, _) = run(
            12000,
            4000,
            ScriptedRecognizer::new("m").partial("").partial("hi").partial(""),
        );

        assert_eq!(lines, ["hi"]);
    }

    #[test]
    fn test_consecutive_duplicates_removed_but_history_forgotten() {
        // Dedup compares only against the immediately preceding emitted
        // partial, not all history: a b a → three lines.
        let (lines, _) = run(
            20000,
            4000,
            ScriptedRecognizer::new("m")
                .partial("a")
                .partial("a")
                .partial("b")
                .partial("a")
                .partial("a"),
        );

        assert_eq!(lines, ["a", "b", "a"]);
    }

    #[test]
    fn test_final_matching_last_partial_is_still_emitted() {
        let (lines, _) = run(
            8000,
            4000,
            ScriptedRecognizer::new("m")
                .partial("hello")
                .finalized("hello"),
        );

        assert_eq!(lines, ["hello", "hello"]);
    }

    #[test]
    fn test_dedup_slot_resets_after_finalization() {
        // The first partial of a new utterance is emitted even when it
        // repeats the previous utterance's last partial verbatim.
        let (lines, _) = run(
            12000,
            4000,
            ScriptedRecognizer::new("m")
                .partial("hello")
                .finalized("hello there")
                .partial("hello"),
        );

        assert_eq!(lines, ["hello", "hello there", "hello"]);
    }

    #[test]
    fn test_chunk_count_matches_ceil_of_input_length() {
        // 10000 bytes at 4000 per chunk → 3 recognizer submissions
        let (_, summary) = run(10000, 4000, ScriptedRecognizer::new("m"));
        assert_eq!(summary.chunks, 3);
    }

    #[test]
    fn test_recognizer_failure_aborts_run() {
        let mut reader = RawChunkReader::new(Cursor::new(vec![0u8; 4000]), 4000);
        let mut recognizer = ScriptedRecognizer::new("m").with_failure();
        let mut sink = CollectorSink::new();

        let result = run_stream(&mut reader, &mut recognizer, &mut sink);
        assert!(result.is_err());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_emission_is_flushed_before_next_chunk_is_read() {
        use crate::error::Result;
        use std::cell::RefCell;
        use std::rc::Rc;

        // Shared event log: every read and every emit records itself, so the
        // interleaving is observable.
        #[derive(Debug, PartialEq)]
        enum Event {
            Read,
            Emit(String),
        }
        let log: Rc<RefCell<Vec<Event>>> = Rc::new(RefCell::new(Vec::new()));

        struct LoggingReader {
            chunks_left: usize,
            log: Rc<RefCell<Vec<Event>>>,
        }
        impl ChunkReader for LoggingReader {
            fn next_chunk(&mut self) -> Result<Option<Vec<i16>>> {
                self.log.borrow_mut().push(Event::Read);
                if self.chunks_left == 0 {
                    return Ok(None);
                }
                self.chunks_left -= 1;
                Ok(Some(vec![0i16; 2000]))
            }
        }

        struct LoggingSink {
            log: Rc<RefCell<Vec<Event>>>,
        }
        impl TextSink for LoggingSink {
            fn emit(&mut self, line: &str) -> Result<()> {
                self.log.borrow_mut().push(Event::Emit(line.to_string()));
                Ok(())
            }
        }

        let mut reader = LoggingReader {
            chunks_left: 2,
            log: Rc::clone(&log),
        };
        let mut sink = LoggingSink {
            log: Rc::clone(&log),
        };
        let mut recognizer = ScriptedRecognizer::new("m").partial("one").partial("two");

        run_stream(&mut reader, &mut recognizer, &mut sink).unwrap();

        let events = log.borrow();
        assert_eq!(
            *events,
            [
                Event::Read,
                Event::Emit("one".to_string()),
                Event::Read,
                Event::Emit("two".to_string()),
                Event::Read,
            ]
        );
    }
}
