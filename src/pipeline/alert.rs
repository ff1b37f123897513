//! Keyword alerting over the transcript stream.
//!
//! Watches every emitted line for configured keywords and raises an alert on
//! stderr when one appears. Matching is case-insensitive substring, so "help"
//! also fires on "helped". The transcript itself passes through unchanged and
//! stdout stays bare lines.

use crate::error::Result;
use crate::output;
use crate::pipeline::sink::TextSink;

/// Case-insensitive keyword matcher.
#[derive(Debug, Clone, Default)]
pub struct KeywordAlerter {
    keywords: Vec<String>,
}

impl KeywordAlerter {
    /// Create a matcher. Keywords are lowercased up front; blank entries are
    /// dropped.
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// First configured keyword contained in the line, if any.
    pub fn matched_keyword(&self, line: &str) -> Option<&str> {
        let lowered = line.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(|k| k.as_str())
    }
}

/// Sink decorator that raises a stderr alert for lines containing a keyword.
///
/// The line is forwarded to the inner sink first, so a downstream reader of
/// stdout sees the transcript before the alert fires. At most one alert per
/// line, even when several keywords match.
pub struct AlertingSink<S: TextSink> {
    inner: S,
    alerter: KeywordAlerter,
    alerts: u64,
}

impl<S: TextSink> AlertingSink<S> {
    pub fn new(inner: S, alerter: KeywordAlerter) -> Self {
        Self {
            inner,
            alerter,
            alerts: 0,
        }
    }

    /// Alerts raised so far.
    pub fn alerts(&self) -> u64 {
        self.alerts
    }

    /// Consume the decorator and return the inner sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: TextSink> TextSink for AlertingSink<S> {
    fn emit(&mut self, line: &str) -> Result<()> {
        self.inner.emit(line)?;
        if let Some(keyword) = self.alerter.matched_keyword(line) {
            self.alerts += 1;
            output::alert(keyword, line);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "alerting"
    }
}
