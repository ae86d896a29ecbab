//! Logging initialization for the command-line tool.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use super::config::{LogFormat, LoggingConfig};

/// Initialize the tracing subscriber based on configuration.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = env_filter(&config.level, std::env::var("RUST_LOG").ok())?;

    let (writer, ansi) = make_writer(config)?;

    let installed = match config.format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(ansi)
                .with_target(config.target)
                .with_span_events(FmtSpan::NONE)
                .with_writer(writer);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(config.target)
                .with_span_events(FmtSpan::NONE)
                .with_writer(writer);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .try_init()
            }
        }
    };
    installed.map_err(|e| LoggingError::Init(e.to_string()))
}

fn env_filter(level: &str, rust_log: Option<String>) -> Result<EnvFilter, LoggingError> {
    let directive = rust_log
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| level.to_string());
    EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter(e.to_string()))
}

fn make_writer(config: &LoggingConfig) -> Result<(BoxMakeWriter, bool), LoggingError> {
    match config.output.as_str() {
        "stdout" => Ok((
            BoxMakeWriter::new(io::stdout),
            config.color && io::stdout().is_terminal(),
        )),
        "stderr" => Ok((
            BoxMakeWriter::new(io::stderr),
            config.color && io::stderr().is_terminal(),
        )),
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::FileOpen(path.to_string(), e))?;
            Ok((BoxMakeWriter::new(file), false))
        }
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug)]
pub enum LoggingError {
    /// Invalid log filter string.
    InvalidFilter(String),
    /// Failed to open log file.
    FileOpen(String, io::Error),
    /// A global subscriber was already installed.
    Init(String),
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => write!(f, "Invalid log filter: {}", msg),
            LoggingError::FileOpen(path, e) => {
                write!(f, "Failed to open log file '{}': {}", path, e)
            }
            LoggingError::Init(msg) => write!(f, "Failed to install logger: {}", msg),
        }
    }
}

impl std::error::Error for LoggingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(path: &std::path::Path) -> LoggingConfig {
        LoggingConfig {
            output: path.display().to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_env_filter_uses_level() {
        assert!(env_filter("debug", None).is_ok());
        assert!(matches!(
            env_filter("config_kv=loud", None),
            Err(LoggingError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_env_filter_rust_log_overrides_level() {
        assert!(env_filter("config_kv=loud", Some("trace".to_string())).is_ok());
        assert!(matches!(
            env_filter("config_kv=loud", Some(String::new())),
            Err(LoggingError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_make_writer_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config-kv.log");

        let (_writer, ansi) = make_writer(&file_config(&path)).unwrap();
        assert!(!ansi);
        assert!(path.exists());
    }

    #[test]
    fn test_make_writer_unopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(&dir.path().join("missing").join("config-kv.log"));

        assert!(matches!(
            make_writer(&config),
            Err(LoggingError::FileOpen(_, _))
        ));
    }

    #[test]
    fn test_make_writer_std_streams() {
        for output in ["stdout", "stderr"] {
            let config = LoggingConfig {
                output: output.to_string(),
                color: false,
                ..LoggingConfig::default()
            };
            let (_writer, ansi) = make_writer(&config).unwrap();
            assert!(!ansi);
        }
    }

    #[test]
    fn test_init_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
            ..file_config(&dir.path().join("config-kv.log"))
        };

        // Only this test installs a global subscriber.
        init(&config).unwrap();
        assert!(matches!(init(&config), Err(LoggingError::Init(_))));
    }
}
