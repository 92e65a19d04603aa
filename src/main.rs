use clap::Parser;
use miette::{Context, Result};
use tracing::info;

use crate::{
    cli::CLIArgs,
    commands::run_command,
    configuration::Configuration,
    logging::initialize_tracing,
};

mod cli;
mod commands;
mod configuration;
mod logging;


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Load configuration.
    let configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => Configuration::load_from_path(path),
        None => Configuration::load_from_default_path(),
    }
    .wrap_err("Failed to load configuration file.")?;


    let logging_raii_guard = initialize_tracing(
        configuration.logging.console_output_level_filter()?,
        configuration.logging.log_file_output_level_filter()?,
        &configuration.logging.log_file_output_directory,
        &configuration.logging.log_file_name,
    )
    .wrap_err("Failed to initialize tracing.")?;

    info!(
        path = %configuration.file_path.display(),
        "Configuration loaded."
    );


    let result = run_command(cli_args.command, &configuration);


    drop(logging_raii_guard);
    result
}
