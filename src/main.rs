use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use tracesift::cli::Cli;
use tracesift::config::Config;
use tracesift::logging;
use tracesift::utils::report_error;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_path) = &cli.config {
        Config::load_custom(config_path)?
    } else {
        Config::load()?
    };

    logging::init_logging(&config.logging, cli.debug, config.general.color)?;

    // Execute command
    cli.command.execute(config, cli.config)?;

    Ok(())
}
