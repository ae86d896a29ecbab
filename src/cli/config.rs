//! Settings for the command-line tool, loaded from TOML.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "config-kv.toml";

/// Top-level settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Store file settings.
    pub store: StoreSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Where the store lives and how it is written.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path of the JSON store file.
    pub file: PathBuf,
    /// Pretty-print the JSON on `export`.
    pub pretty: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("config.json"),
            pretty: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "warn" or "config_kv=debug".
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// "stdout", "stderr" or a file path.
    pub output: String,
    /// Use ANSI colors when writing to a terminal.
    pub color: bool,
    /// Include timestamps.
    pub timestamps: bool,
    /// Include the event target.
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            timestamps: false,
            target: false,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Parse settings from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(SettingsError::Parse)
    }

    /// Load `path` if given, else [`DEFAULT_SETTINGS_FILE`] if it exists,
    /// else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Settings error.
#[derive(Debug)]
pub enum SettingsError {
    /// IO error reading the settings file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(path, e) => {
                write!(f, "Failed to read settings file '{}': {}", path, e)
            }
            SettingsError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml = r#"
[store]
file = "/etc/app/config.json"
pretty = false

[logging]
level = "config_kv=debug"
format = "json"
output = "stdout"
timestamps = true
"#;
        let settings = Settings::from_str(toml).unwrap();
        assert_eq!(settings.store.file, PathBuf::from("/etc/app/config.json"));
        assert!(!settings.store.pretty);
        assert_eq!(settings.logging.level, "config_kv=debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.output, "stdout");
        assert!(settings.logging.timestamps);
        assert!(settings.logging.color);
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = Settings::from_str("").unwrap();
        assert_eq!(settings.store.file, PathBuf::from("config.json"));
        assert!(settings.store.pretty);
        assert_eq!(settings.logging.level, "warn");
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.logging.output, "stderr");
    }

    #[test]
    fn test_invalid_settings() {
        let err = Settings::from_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
