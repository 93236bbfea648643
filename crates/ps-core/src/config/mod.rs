//! Configuration DTO.
//!
//! Data only: TOML is mapped field by field. Missing keys become empty
//! values (`0`, `""`), and nothing here validates or substitutes defaults;
//! the wiring layer decides what an empty value means.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Poll period in milliseconds (`0` when missing).
    pub poll_interval_ms: u64,

    /// History bound (`0` when missing).
    pub max_history_entries: u64,

    /// Raw pasteboard kind string, not parsed here.
    pub pasteboard_kind: String,

    /// Directory for the rolling log file (empty when missing).
    pub log_directory: PathBuf,
}

impl AppConfig {
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            poll_interval_ms: toml_value
                .get("poller")
                .and_then(|p| p.get("interval_ms"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            max_history_entries: toml_value
                .get("history")
                .and_then(|h| h.get("max_entries"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            pasteboard_kind: toml_value
                .get("pasteboard")
                .and_then(|p| p.get("kind"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            log_directory: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("directory"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    pub fn empty() -> Self {
        Self {
            poll_interval_ms: 0,
            max_history_entries: 0,
            pasteboard_kind: String::new(),
            log_directory: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    fn parse(s: &str) -> AppConfig {
        let value: Value = toml::from_str(s).unwrap();
        AppConfig::from_toml(&value).unwrap()
    }

    #[test]
    fn test_from_toml_reads_every_section() {
        let config = parse(
            r#"
            [poller]
            interval_ms = 100
            [history]
            max_entries = 50
            [pasteboard]
            kind = "drag"
            [logging]
            directory = "/tmp/pasteshow-logs"
        "#,
        );

        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.max_history_entries, 50);
        assert_eq!(config.pasteboard_kind, "drag");
        assert_eq!(config.log_directory, PathBuf::from("/tmp/pasteshow-logs"));
    }

    #[test]
    fn test_missing_sections_are_empty_facts() {
        let config = parse("");
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_unknown_kind_is_kept_verbatim() {
        // Interpretation belongs to the wiring layer.
        let config = parse("[pasteboard]\nkind = \"find\"");
        assert_eq!(config.pasteboard_kind, "find");
    }

    #[test]
    fn test_negative_numbers_read_as_zero() {
        let config = parse("[poller]\ninterval_ms = -5\n[history]\nmax_entries = -1");
        assert_eq!(config.poll_interval_ms, 0);
        assert_eq!(config.max_history_entries, 0);
    }

    #[test]
    fn test_wrong_value_type_is_empty() {
        let config = parse("[poller]\ninterval_ms = \"fast\"");
        assert_eq!(config.poll_interval_ms, 0);
    }
}
