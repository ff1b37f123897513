use crate::error::{Result, VoskpipeError};
use std::collections::VecDeque;

/// Outcome of feeding one chunk of audio to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The recognizer detected an utterance boundary; a final transcript is
    /// available from `final_text`.
    Finalized,
    /// Decoding is still in progress for the current utterance; the current
    /// best guess is available from `partial_text`.
    Decoding,
}

/// Trait for stateful streaming speech recognition.
///
/// The recognizer accumulates audio across calls. This trait allows swapping
/// implementations (real Vosk vs scripted fake for tests).
pub trait StreamingRecognizer: Send {
    /// Feed one chunk of 16-bit mono PCM samples.
    ///
    /// Returns whether the chunk completed an utterance or decoding continues.
    fn accept_chunk(&mut self, samples: &[i16]) -> Result<DecodeOutcome>;

    /// Final transcript for the utterance that just finalized.
    ///
    /// Empty string when the recognizer heard nothing worth reporting.
    fn final_text(&mut self) -> Result<String>;

    /// Current best-guess transcript for the utterance in progress.
    fn partial_text(&mut self) -> Result<String>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;
}

/// One scripted recognizer response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptStep {
    Partial(String),
    Final(String),
}

/// Scripted recognizer for testing.
///
/// Plays back a fixed sequence of partial/final responses, one per accepted
/// chunk. Once the script is exhausted, further chunks yield an empty partial.
#[derive(Debug, Clone)]
pub struct ScriptedRecognizer {
    model_name: String,
    script: VecDeque<ScriptStep>,
    current: Option<ScriptStep>,
    chunks_accepted: usize,
    should_fail: bool,
}

impl ScriptedRecognizer {
    /// Create a new scripted recognizer with an empty script
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            script: VecDeque::new(),
            current: None,
            chunks_accepted: 0,
            should_fail: false,
        }
    }

    /// Queue a partial hypothesis for the next chunk
    pub fn partial(mut self, text: &str) -> Self {
        self.script.push_back(ScriptStep::Partial(text.to_string()));
        self
    }

    /// Queue a finalized utterance for the next chunk
    pub fn finalized(mut self, text: &str) -> Self {
        self.script.push_back(ScriptStep::Final(text.to_string()));
        self
    }

    /// Configure the recognizer to fail on accept_chunk
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Number of chunks fed so far
    pub fn chunks_accepted(&self) -> usize {
        self.chunks_accepted
    }
}

impl StreamingRecognizer for ScriptedRecognizer {
    fn accept_chunk(&mut self, _samples: &[i16]) -> Result<DecodeOutcome> {
        if self.should_fail {
            return Err(VoskpipeError::Recognizer {
                message: "scripted recognizer failure".to_string(),
            });
        }

        self.chunks_accepted += 1;
        let step = self
            .script
            .pop_front()
            .unwrap_or_else(|| ScriptStep::Partial(String::new()));
        let outcome = match step {
            ScriptStep::Partial(_) => DecodeOutcome::Decoding,
            ScriptStep::Final(_) => DecodeOutcome::Finalized,
        };
        self.current = Some(step);
        Ok(outcome)
    }

    fn final_text(&mut self) -> Result<String> {
        match &self.current {
            Some(ScriptStep::Final(text)) => Ok(text.clone()),
            _ => Ok(String::new()),
        }
    }

    fn partial_text(&mut self) -> Result<String> {
        match &self.current {
            Some(ScriptStep::Partial(text)) => Ok(text.clone()),
            _ => Ok(String::new()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
