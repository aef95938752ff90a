//! Structured JSON logger
//!
//! One log line = one event. The `event` key comes first, then `severity`,
//! then caller fields sorted by key so output is deterministic.

use std::fmt;
use std::io::{self, Write};

use serde_json::Value;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info = 0,
    /// Caller contract violations that were rejected
    Warn = 1,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
        }
    }

    /// Rejections go to stderr
    fn uses_stderr(&self) -> bool {
        *self >= Severity::Warn
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that writes one JSON object per line.
pub(crate) struct Logger;

impl Logger {
    /// Writes a rendered line, routing WARN to stderr.
    pub(crate) fn emit(severity: Severity, line: &str) {
        if severity.uses_stderr() {
            Self::write_line(line, &mut io::stderr());
        } else {
            Self::write_line(line, &mut io::stdout());
        }
    }

    fn write_line<W: Write>(line: &str, writer: &mut W) {
        // Logging must never fail the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Renders one event as a newline-terminated JSON object.
    ///
    /// A field key repeated by the caller is written once, keeping the
    /// last value.
    pub(crate) fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut sorted: Vec<(&str, &str)> = Vec::with_capacity(fields.len());
        for &(key, value) in fields {
            match sorted.binary_search_by_key(&key, |&(k, _)| k) {
                Ok(pos) => sorted[pos].1 = value,
                Err(pos) => sorted.insert(pos, (key, value)),
            }
        }

        let mut output = String::with_capacity(128);
        output.push_str("{\"event\":");
        output.push_str(&quote(event));
        output.push_str(",\"severity\":");
        output.push_str(&quote(severity.as_str()));
        for (key, value) in sorted {
            output.push(',');
            output.push_str(&quote(key));
            output.push(':');
            output.push_str(&quote(value));
        }
        output.push_str("}\n");
        output
    }
}

/// JSON string literal for `s`, escaped by serde_json.
fn quote(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}

#[cfg(test)]
pub(crate) fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::write_line(&Logger::render(severity, event, fields), &mut buffer);
    String::from_utf8(buffer).unwrap()
}
