//! Command-line definitions and command execution for `config-kv`.
//!
//! Commands write their results to `out` and diagnostics to `err`, so they
//! can be driven without a process or a terminal.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codec::{self, CodecError, DecodeReport, Decoded};
use crate::kv::{Store, StoreError, ValueKind};
use crate::logging::warn;

use super::args::{ArgError, parse_kind_arg, parse_values};
use super::config::Settings;

/// Errors from running a command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Invalid value: {0}")]
    Arg(#[from] ArgError),

    #[error("Store file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(String),

    #[error(
        "Refusing to save {path}: {count} rejected entries would be lost ({entries}); use --force to save anyway"
    )]
    RejectedEntries {
        path: String,
        count: usize,
        entries: String,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    fn rejected(path: &Path, report: &DecodeReport) -> Self {
        let entries = report
            .rejected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        CommandError::RejectedEntries {
            path: path.display().to_string(),
            count: report.rejected.len(),
            entries,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "config-kv")]
#[command(about = "Typed key-value configuration store backed by a JSON file")]
pub struct Cli {
    /// Settings file (defaults to config-kv.toml when present)
    #[arg(long, global = true, env = "CONFIG_KV_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Store file (overrides the settings file)
    #[arg(short, long, global = true, env = "CONFIG_KV_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The store file: `--file` if given, else the one from `settings`.
    pub fn store_path(&self, settings: &Settings) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| settings.store.file.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty store file
    Init {
        /// Overwrite an existing store file
        #[arg(long)]
        force: bool,
    },

    /// Set a value, creating the key if needed
    Set {
        /// Key to set
        key: String,

        /// Value type (INT, FLOAT, STRING, INT_ARRAY, FLOAT_ARRAY, STRING_ARRAY)
        #[arg(short = 't', long = "type", value_parser = parse_kind_arg)]
        kind: ValueKind,

        /// One value for scalar types, any number for array types
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// Save even if entries in the file were rejected on load (they are dropped)
        #[arg(long)]
        force: bool,
    },

    /// Print a value
    Get {
        /// Key to read
        key: String,

        /// Fail unless the key holds this type
        #[arg(short = 't', long = "type", value_parser = parse_kind_arg)]
        kind: Option<ValueKind>,
    },

    /// List keys with their types and element counts
    List,

    /// Remove a key
    Remove {
        /// Key to remove
        key: String,

        /// Save even if entries in the file were rejected on load (they are dropped)
        #[arg(long)]
        force: bool,
    },

    /// Print the store as JSON
    Export {
        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },
}

/// Run `command` against the store file at `path`.
pub fn execute(
    command: Commands,
    path: &Path,
    settings: &Settings,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CommandError> {
    match command {
        Commands::Init { force } => {
            if path.exists() && !force {
                return Err(CommandError::AlreadyExists(path.display().to_string()));
            }
            codec::save(&Store::new(), path)?;
            writeln!(out, "Initialized empty store at {}", path.display())?;
        }

        Commands::Set {
            key,
            kind,
            values,
            force,
        } => {
            let mut store = if path.exists() {
                open_for_update(path, force, err)?
            } else {
                Store::new()
            };
            let value = parse_values(kind, &values)?;
            store.put_checked(&key, kind, &value, value.element_count())?;
            codec::save(&store, path)?;
        }

        Commands::Get { key, kind } => {
            let store = open(path, err)?;
            let value = match kind {
                Some(kind) => store.get(&key, kind)?,
                None => store.get_any(&key)?,
            };
            writeln!(out, "{}", value)?;
        }

        Commands::List => {
            let store = open(path, err)?;
            for record in &store {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    record.key(),
                    record.kind(),
                    record.element_count()
                )?;
            }
        }

        Commands::Remove { key, force } => {
            let mut store = open_for_update(path, force, err)?;
            store.remove(&key)?;
            codec::save(&store, path)?;
        }

        Commands::Export { compact } => {
            let store = open(path, err)?;
            let pretty = settings.store.pretty && !compact;
            writeln!(out, "{}", codec::to_string(&store, pretty)?)?;
        }
    }

    Ok(())
}

/// Load the store for reading, reporting rejected entries on `err`.
fn open(path: &Path, err: &mut impl Write) -> Result<Store, CommandError> {
    let Decoded { store, report } = codec::load(path)?;
    report_rejected(&report, err)?;
    Ok(store)
}

/// Load the store for a command that saves it back.
///
/// Rejected entries would be dropped by the save, so they fail the command
/// unless `force` is set.
fn open_for_update(path: &Path, force: bool, err: &mut impl Write) -> Result<Store, CommandError> {
    let Decoded { store, report } = codec::load(path)?;
    if report.has_errors() {
        if !force {
            return Err(CommandError::rejected(path, &report));
        }
        warn!(
            path = %path.display(),
            dropped = report.rejected.len(),
            "saving without rejected entries"
        );
        report_rejected(&report, err)?;
    }
    Ok(store)
}

fn report_rejected(report: &DecodeReport, err: &mut impl Write) -> io::Result<()> {
    if !report.has_errors() {
        return Ok(());
    }
    writeln!(err, "{}", report.summary())?;
    for rejected in &report.rejected {
        writeln!(err, "  {}", rejected)?;
    }
    Ok(())
}
