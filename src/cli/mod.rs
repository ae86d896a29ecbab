//! Support code for the `config-kv` command-line tool.

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use args::{ArgError, parse_kind_arg, parse_values};
pub use commands::{Cli, CommandError, Commands, execute};
pub use config::{LogFormat, LoggingConfig, Settings, SettingsError, StoreSettings};
pub use logging::LoggingError;
