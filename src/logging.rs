use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Sets up the global subscriber: a console layer on stdout and a
/// non-blocking, non-rotating log file in `log_file_output_directory`.
///
/// Keep the returned guard alive for as long as the program runs,
/// dropping it flushes the file writer.
pub fn initialize_tracing<P: AsRef<Path>>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: P,
    log_file_name: &str,
) -> Result<WorkerGuard> {
    let log_file_output_directory = log_file_output_directory.as_ref();

    if !log_file_output_directory.is_dir() {
        std::fs::create_dir_all(log_file_output_directory)
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Failed to create missing log directory at {}.",
                    log_file_output_directory.display()
                )
            })?;
    }


    let file_appender = tracing_appender::rolling::never(log_file_output_directory, log_file_name);
    let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_filter(console_level_filter);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file_writer)
        .with_ansi(false)
        .with_filter(log_file_level_filter);


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to set global tracing subscriber.")?;

    Ok(guard)
}
