use crate::error::Result;
use std::io::Write;

/// Pluggable transcript output handler for the streaming loop.
/// Pairs with ChunkReader for input - this handles transcription output.
pub trait TextSink {
    /// Emit one transcript line. The line must be visible to a downstream
    /// reader before this returns (no buffering across chunks).
    fn emit(&mut self, line: &str) -> Result<()>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

/// Sink that prints each line to stdout and flushes immediately.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl TextSink for StdoutSink {
    fn emit(&mut self, line: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}

/// Sink that collects lines in memory. Used by tests and diagnostics.
#[derive(Debug, Default)]
pub struct CollectorSink {
    lines: Vec<String>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the sink and return the collected lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl TextSink for CollectorSink {
    fn emit(&mut self, line: &str) -> Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}
