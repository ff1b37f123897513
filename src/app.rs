//! Streaming transcription entry point.
//!
//! Orchestrates the complete pipe flow:
//! stdin chunks → recognizer → stdout lines

use crate::audio::reader::{ChunkReader, RawChunkReader};
use crate::audio::wav::WavChunkReader;
use crate::config::{AudioFormat, Config};
use crate::error::Result;
use crate::output;
use crate::pipeline::alert::{AlertingSink, KeywordAlerter};
use crate::pipeline::sink::StdoutSink;
use crate::pipeline::stream::run_stream;
use crate::stt::vosk::{VoskConfig, VoskRecognizer};
use std::path::PathBuf;

/// Run the transcription loop on stdin: read audio → recognize → print text.
///
/// # Arguments
/// * `config` - Base configuration (can be overridden by CLI args)
/// * `model` - Optional model directory override from CLI
/// * `sample_rate` - Optional sample rate override from CLI
/// * `format` - Optional input format override from CLI
/// * `chunk_bytes` - Optional chunk size override from CLI
/// * `alert_keywords` - Keywords from CLI; non-empty replaces alert.keywords
/// * `quiet` - Suppress status messages
/// * `verbosity` - Verbosity level (0=default, 1=run summary, 2=configuration detail)
///
/// # Returns
/// Ok(()) when the input stream ends normally, or the first error any step
/// produced. Errors are never swallowed: the recognizer is stateful, so a
/// failed chunk leaves it in an unknown state and the run aborts.
pub fn run_transcribe_command(
    config: Config,
    model: Option<PathBuf>,
    sample_rate: Option<u32>,
    format: Option<AudioFormat>,
    chunk_bytes: Option<usize>,
    alert_keywords: Vec<String>,
    quiet: bool,
    verbosity: u8,
) -> Result<()> {
    let config = apply_overrides(
        config,
        model,
        sample_rate,
        format,
        chunk_bytes,
        alert_keywords,
    );
    config.validate()?;

    if !quiet && verbosity >= 2 {
        output::status(&format!(
            "Backend {}, {} Hz, {} bytes per chunk, {:?} input",
            crate::defaults::recognizer_backend(),
            config.audio.sample_rate,
            config.stream.chunk_bytes,
            config.stream.format
        ));
    }

    // Load model ONCE before the loop (this is the slow part)
    if !quiet {
        eprintln!("Loading model '{}'...", config.stt.model);
    }
    let mut recognizer = create_recognizer(&config)?;
    if !quiet {
        eprintln!("Ready. Reading audio from stdin...");
    }

    let mut reader = create_reader(&config)?;
    let alerter = KeywordAlerter::new(&config.alert.keywords);
    let mut sink = AlertingSink::new(StdoutSink::new(), alerter);

    let summary = run_stream(reader.as_mut(), &mut recognizer, &mut sink)?;

    if !quiet && verbosity >= 1 {
        output::status(&output::format_summary(&summary));
        if sink.alerts() > 0 {
            output::status(&output::format_alert_summary(sink.alerts()));
        }
    }

    Ok(())
}

/// Apply CLI overrides on top of the loaded configuration.
fn apply_overrides(
    mut config: Config,
    model: Option<PathBuf>,
    sample_rate: Option<u32>,
    format: Option<AudioFormat>,
    chunk_bytes: Option<usize>,
    alert_keywords: Vec<String>,
) -> Config {
    if let Some(m) = model {
        config.stt.model = m.display().to_string();
    }
    if let Some(r) = sample_rate {
        config.audio.sample_rate = r;
    }
    if let Some(f) = format {
        config.stream.format = f;
    }
    if let Some(c) = chunk_bytes {
        config.stream.chunk_bytes = c;
    }
    if !alert_keywords.is_empty() {
        config.alert.keywords = alert_keywords;
    }
    config
}

/// Create the recognizer for the configured model and sample rate.
fn create_recognizer(config: &Config) -> Result<VoskRecognizer> {
    VoskRecognizer::new(VoskConfig {
        model_path: PathBuf::from(&config.stt.model),
        sample_rate: config.audio.sample_rate,
    })
}

/// Create the chunk reader for the configured input format.
fn create_reader(config: &Config) -> Result<Box<dyn ChunkReader>> {
    Ok(match config.stream.format {
        AudioFormat::Raw => Box::new(RawChunkReader::new(
            std::io::stdin().lock(),
            config.stream.chunk_bytes,
        )),
        AudioFormat::Wav => Box::new(WavChunkReader::from_stdin(
            config.audio.sample_rate,
            config.stream.chunk_bytes,
        )?),
    })
}
