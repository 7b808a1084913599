use miette::{Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::configuration::LoggingConfiguration;


/// Keeps the background log file writer alive. Dropping it flushes the log file.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_writer_guard: Option<WorkerGuard>,
}


/// Installs the global tracing subscriber.
///
/// Console output goes to stderr, so stdout stays reserved for the printed
/// configuration. If a log directory is configured, a non-blocking file layer
/// writes `log_file_name` inside it as well.
pub fn initialize_tracing(
    logging: &LoggingConfiguration,
    log_file_name: &str,
) -> Result<LoggingGuard> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(logging.console_output_level_filter()?);

    let (file_layer, file_writer_guard) = match logging.log_file_output_directory.as_ref() {
        Some(log_file_output_directory) => {
            let file_appender =
                tracing_appender::rolling::never(log_file_output_directory, log_file_name);
            let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_appender)
                .with_filter(logging.log_file_output_level_filter()?);

            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install the tracing subscriber.")?;

    Ok(LoggingGuard {
        _file_writer_guard: file_writer_guard,
    })
}
