//! Terminal status rendering for stderr.
//!
//! Transcript lines are the only stdout output; everything human-facing
//! (status, summaries) goes to stderr so piping stays clean.

use crate::pipeline::stream::StreamSummary;

const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Print a dimmed status line to stderr.
pub fn status(message: &str) {
    eprintln!("{DIM}{message}{RESET}");
}

/// Print a keyword alert to stderr. Not gated by `--quiet`; raising the
/// alert is the point of configuring keywords.
pub fn alert(keyword: &str, line: &str) {
    eprintln!("{RED}{}{RESET}", format_alert(keyword, line));
}

/// Render a keyword alert line.
pub fn format_alert(keyword: &str, line: &str) -> String {
    format!("ALERT [{}]: {}", keyword, line)
}

/// Render a run summary as a single human-readable line.
pub fn format_summary(summary: &StreamSummary) -> String {
    format!(
        "{} final{}, {} partial{} from {} chunk{}",
        summary.finals,
        plural(summary.finals),
        summary.partials,
        plural(summary.partials),
        summary.chunks,
        plural(summary.chunks),
    )
}

/// Render the alert count for the run summary.
pub fn format_alert_summary(alerts: u64) -> String {
    format!("{} keyword alert{}", alerts, plural(alerts))
}

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
