use clap::Parser;
use std::io;
use std::process::ExitCode;
use thiserror::Error;

use config_kv::cli::{
    Cli, CommandError, LoggingError, Settings, SettingsError, commands, logging,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.settings.as_deref())?;
    logging::init(&settings.logging)?;

    let path = cli.store_path(&settings);
    commands::execute(
        cli.command,
        &path,
        &settings,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;

    Ok(())
}
