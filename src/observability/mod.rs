//! Observability for tuple descriptors
//!
//! Structured JSON logging of the few events this crate produces:
//! rejected descriptor construction and type layout loading.
//! Lines are rendered with `event_line` and written with
//! `emit_event_line`, so callers can check exactly what they log.

mod logger;

pub use logger::Severity;

use logger::Logger;

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Descriptor construction rejected (empty or mismatched input)
    TupleDescRejected,
    /// Type layout configuration loaded
    TypeLayoutLoaded,
    /// Type layout configuration rejected
    TypeLayoutRejected,
}

impl Event {
    /// Returns the event name as written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TupleDescRejected => "TUPLE_DESC_REJECTED",
            Event::TypeLayoutLoaded => "TYPE_LAYOUT_LOADED",
            Event::TypeLayoutRejected => "TYPE_LAYOUT_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TypeLayoutLoaded => Severity::Info,
            Event::TupleDescRejected | Event::TypeLayoutRejected => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Renders the log line for `event` without writing it.
pub(crate) fn event_line(event: Event, fields: &[(&str, &str)]) -> String {
    Logger::render(event.severity(), event.as_str(), fields)
}

/// Writes a line produced by `event_line` to the stream for `event`.
pub(crate) fn emit_event_line(event: Event, line: &str) {
    Logger::emit(event.severity(), line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::TupleDescRejected.as_str(), "TUPLE_DESC_REJECTED");
        assert_eq!(Event::TypeLayoutLoaded.as_str(), "TYPE_LAYOUT_LOADED");
        assert_eq!(Event::TypeLayoutRejected.to_string(), "TYPE_LAYOUT_REJECTED");
    }

    #[test]
    fn test_rejections_are_warnings() {
        assert_eq!(Event::TupleDescRejected.severity(), Severity::Warn);
        assert_eq!(Event::TypeLayoutRejected.severity(), Severity::Warn);
        assert_eq!(Event::TypeLayoutLoaded.severity(), Severity::Info);
    }

    #[test]
    fn test_event_line_uses_event_severity() {
        let line = event_line(Event::TypeLayoutRejected, &[("path", "/tmp/layout.json")]);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "TYPE_LAYOUT_REJECTED");
        assert_eq!(parsed["severity"], "WARN");
        assert_eq!(parsed["path"], "/tmp/layout.json");

        let line = event_line(Event::TypeLayoutLoaded, &[]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["severity"], "INFO");
    }
}
