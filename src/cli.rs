//! Command-line interface for voskpipe
//!
//! Provides argument parsing using clap derive macros.

use crate::config::AudioFormat;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Streaming speech-to-text from standard input
#[derive(Parser, Debug)]
#[command(
    name = "voskpipe",
    version,
    about = "Streaming speech-to-text from standard input"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: run summary, -vv: configuration detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the Vosk model directory
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Input sample rate in Hz (default: 16000)
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Input container format (default: raw)
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<AudioFormat>,

    /// Bytes of audio per recognizer submission (default: 4000)
    #[arg(long, value_name = "BYTES")]
    pub chunk_bytes: Option<usize>,

    /// Raise a stderr alert when this keyword appears in the transcript
    /// (repeatable; overrides alert.keywords from the config file)
    #[arg(long, value_name = "WORD")]
    pub alert_keyword: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check configuration, model, and compiled backend
    Check,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., stt.model)
    Get {
        /// Dotted key path (e.g., stt.model, audio.sample_rate)
        key: String,
    },
    /// Set a configuration value by key
    Set {
        /// Dotted key path (e.g., stt.model, audio.sample_rate)
        key: String,
        /// Value to set
        value: String,
    },
    /// List current configuration values
    List,
    /// Dump a commented configuration template
    Dump,
}
