//! Configuration loader.
//!
//! Reads and parses the TOML file into the [`AppConfig`] DTO. Accepts
//! whatever is in the file; interpreting empty values is the wiring layer's
//! job.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ps_core::AppConfig;

const APP_DIR_NAME: &str = "pasteshow";
const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config dir>/pasteshow/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Like [`load_config`], but a missing file is an empty config rather than
/// an error.
pub fn load_config_or_empty(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        return Ok(AppConfig::empty());
    }
    load_config(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
                [poller]
                interval_ms = 500
                [history]
                max_entries = 20
                [pasteboard]
                kind = "drag"
                "#,
            )
            .unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.max_history_entries, 20);
        assert_eq!(config.pasteboard_kind, "drag");
        assert_eq!(config.log_directory, PathBuf::new());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[poller\ninterval_ms = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(format!("{err:#}").contains("TOML"));
    }

    #[test]
    fn test_missing_file_is_an_error_for_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(load_config(&path).is_err());
        assert_eq!(load_config_or_empty(&path).unwrap(), AppConfig::empty());
    }

    #[test]
    fn test_default_path_ends_with_app_file() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("pasteshow/config.toml"));
        }
    }
}
