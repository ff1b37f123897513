//! Environment diagnostics for the `check` command.
//!
//! Verifies that the configuration parses, the model directory exists, and a
//! real recognizer backend is compiled in.

use crate::config::Config;
use crate::defaults;
use owo_colors::OwoColorize;
use std::path::Path;

/// Result of a single check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Ready to use
    Ok,
    /// Missing, transcription cannot work
    NotFound,
    /// Usable with caveats
    Warning(String),
}

/// Check whether the configured model directory exists.
fn check_model(config: &Config) -> CheckResult {
    let path = Path::new(&config.stt.model);
    if path.is_dir() {
        CheckResult::Ok
    } else if path.exists() {
        CheckResult::Warning(format!(
            "'{}' exists but is not a directory (Vosk models are directories)",
            config.stt.model
        ))
    } else {
        CheckResult::NotFound
    }
}

/// Check which recognizer backend this binary was compiled with.
fn check_backend() -> CheckResult {
    if cfg!(feature = "vosk") {
        CheckResult::Ok
    } else {
        CheckResult::Warning(
            "built without the vosk feature; only scripted recognition is available".to_string(),
        )
    }
}

/// Run all checks and print results.
///
/// Returns true when transcription would work with the given configuration.
pub fn check_environment(config: &Config, config_path: &Path) -> bool {
    println!("voskpipe {}\n", crate::version_string());

    print!("Config ({}): ", config_path.display());
    if config_path.exists() {
        println!("{} OK", "✓".green());
    } else {
        println!("{}", "- not present (using defaults)".dimmed());
    }

    print!("Model ({}): ", config.stt.model);
    let model_ok = match check_model(config) {
        CheckResult::Ok => {
            println!("{} OK", "✓".green());
            true
        }
        CheckResult::NotFound => {
            println!("{}", "✗ NOT FOUND".red());
            println!(
                "  Download a model from https://alphacephei.com/vosk/models and unpack it,\n\
                 \x20 or point stt.model at an existing one: voskpipe config set stt.model <path>"
            );
            false
        }
        CheckResult::Warning(msg) => {
            println!("{} {}", "⚠ WARNING:".yellow(), msg);
            false
        }
    };

    print!("Recognizer backend: ");
    let backend_ok = match check_backend() {
        CheckResult::Ok => {
            println!("{} {}", "✓".green(), defaults::recognizer_backend());
            true
        }
        CheckResult::Warning(msg) => {
            println!("{} {}", "⚠ WARNING:".yellow(), msg);
            false
        }
        CheckResult::NotFound => {
            println!("{}", "✗ NOT FOUND".red());
            false
        }
    };

    println!(
        "\nAudio: {} Hz, {} bytes per chunk, {:?} input",
        config.audio.sample_rate, config.stream.chunk_bytes, config.stream.format
    );

    model_ok && backend_ok
}
