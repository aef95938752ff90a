//! Type layout configuration
//!
//! Maps each column type to its fixed on-row byte length. Defaults match
//! the engine's page format: 4-byte integers and 128-byte strings behind a
//! 4-byte length prefix.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::observability::{emit_event_line, event_line, Event};
use crate::schema::{DescError, DescResult};

/// Payload bytes reserved for a string value
pub const STRING_PAYLOAD_LEN: usize = 128;

/// Largest byte length a single type may occupy: one 64 KiB page
pub const MAX_TYPE_LEN: usize = 64 * 1024;

/// Type → byte length mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLayout {
    /// Bytes per int field (default: 4)
    #[serde(default = "default_int_len")]
    pub int_len: usize,

    /// Bytes per string field, prefix included (default: 132)
    #[serde(default = "default_string_len")]
    pub string_len: usize,
}

fn default_int_len() -> usize {
    4
}

fn default_string_len() -> usize {
    STRING_PAYLOAD_LEN + 4
}

impl Default for TypeLayout {
    fn default() -> Self {
        Self {
            int_len: default_int_len(),
            string_len: default_string_len(),
        }
    }
}

impl TypeLayout {
    /// Layout with a custom string length and the default int length
    pub fn with_string_len(string_len: usize) -> Self {
        Self {
            string_len,
            ..Default::default()
        }
    }

    /// Every length must lie in `1..=MAX_TYPE_LEN`
    pub fn validate(&self) -> DescResult<()> {
        check_len("int_len", self.int_len)?;
        check_len("string_len", self.string_len)
    }

    /// Parses and validates a JSON layout. Missing keys take their defaults.
    pub fn from_json_str(s: &str) -> DescResult<Self> {
        let layout: TypeLayout = serde_json::from_str(s)
            .map_err(|e| DescError::InvalidConfig(format!("invalid JSON: {}", e)))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Loads a layout from a JSON file.
    pub fn load(path: &Path) -> DescResult<Self> {
        let path_str = path.display().to_string();

        let result = fs::read_to_string(path)
            .map_err(|e| DescError::InvalidConfig(format!("failed to read '{}': {}", path_str, e)))
            .and_then(|content| Self::from_json_str(&content));

        let (event, line) = load_outcome_line(&path_str, &result);
        emit_event_line(event, &line);

        result
    }
}

fn check_len(key: &str, len: usize) -> DescResult<()> {
    if len == 0 {
        return Err(DescError::InvalidConfig(format!("{} must be positive", key)));
    }
    if len > MAX_TYPE_LEN {
        return Err(DescError::InvalidConfig(format!(
            "{} is {} bytes; at most {} allowed",
            key, len, MAX_TYPE_LEN
        )));
    }
    Ok(())
}

/// Event and rendered log line describing the result of `load`.
fn load_outcome_line(path: &str, result: &DescResult<TypeLayout>) -> (Event, String) {
    match result {
        Ok(layout) => {
            let int_len = layout.int_len.to_string();
            let string_len = layout.string_len.to_string();
            let event = Event::TypeLayoutLoaded;
            let line = event_line(
                event,
                &[
                    ("path", path),
                    ("int_len", int_len.as_str()),
                    ("string_len", string_len.as_str()),
                ],
            );
            (event, line)
        }
        Err(e) => {
            let reason = e.to_string();
            let event = Event::TypeLayoutRejected;
            let line = event_line(
                event,
                &[("path", path), ("code", e.code()), ("reason", reason.as_str())],
            );
            (event, line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_layout() {
        let layout = TypeLayout::default();
        assert_eq!(layout.int_len, 4);
        assert_eq!(layout.string_len, 132);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_with_string_len() {
        let layout = TypeLayout::with_string_len(20);
        assert_eq!(layout.int_len, 4);
        assert_eq!(layout.string_len, 20);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let layout = TypeLayout::from_json_str(r#"{"string_len": 64}"#).unwrap();
        assert_eq!(layout.int_len, 4);
        assert_eq!(layout.string_len, 64);

        let layout = TypeLayout::from_json_str("{}").unwrap();
        assert_eq!(layout, TypeLayout::default());
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = TypeLayout::from_json_str(r#"{"int_len": 0}"#).unwrap_err();
        assert_eq!(err.code(), "TD_INVALID_CONFIG");
        assert!(err.to_string().contains("int_len"));
    }

    #[test]
    fn test_oversized_length_rejected() {
        let err = TypeLayout::from_json_str(r#"{"string_len": 18446744073709551615}"#).unwrap_err();
        assert_eq!(err.code(), "TD_INVALID_CONFIG");
        assert!(err.to_string().contains("string_len"));

        let err = TypeLayout::from_json_str(&format!(r#"{{"int_len": {}}}"#, MAX_TYPE_LEN + 1))
            .unwrap_err();
        assert!(err.to_string().contains("int_len"));

        let layout = TypeLayout::from_json_str(&format!(r#"{{"int_len": {}}}"#, MAX_TYPE_LEN)).unwrap();
        assert_eq!(layout.int_len, MAX_TYPE_LEN);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = TypeLayout::from_json_str("{not json").unwrap_err();
        assert_eq!(err.code(), "TD_INVALID_CONFIG");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"int_len": 8, "string_len": 36}}"#).unwrap();

        let layout = TypeLayout::load(file.path()).unwrap();
        assert_eq!(layout.int_len, 8);
        assert_eq!(layout.string_len, 36);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TypeLayout::load(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.code(), "TD_INVALID_CONFIG");
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_loaded_outcome_logged() {
        let result = TypeLayout::from_json_str(r#"{"string_len": 20}"#);
        let (event, line) = load_outcome_line("/data/layout.json", &result);
        assert_eq!(event, Event::TypeLayoutLoaded);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "TYPE_LAYOUT_LOADED");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["path"], "/data/layout.json");
        assert_eq!(parsed["int_len"], "4");
        assert_eq!(parsed["string_len"], "20");
    }

    #[test]
    fn test_rejected_outcome_logged() {
        let result = TypeLayout::from_json_str(r#"{"int_len": 0}"#);
        let (event, line) = load_outcome_line("/data/layout.json", &result);
        assert_eq!(event, Event::TypeLayoutRejected);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "TYPE_LAYOUT_REJECTED");
        assert_eq!(parsed["severity"], "WARN");
        assert_eq!(parsed["path"], "/data/layout.json");
        assert_eq!(parsed["code"], "TD_INVALID_CONFIG");
        assert_eq!(parsed["reason"], "invalid type layout: int_len must be positive");
    }
}
