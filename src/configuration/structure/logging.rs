use std::path::PathBuf;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use crate::configuration::traits::ResolvableConfiguration;


/// Logging options as given on the command line.
#[derive(Clone, Debug)]
pub struct UnresolvedLoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    pub log_file_output_directory: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    /// File logging is disabled when this is `None`.
    pub log_file_output_directory: Option<PathBuf>,
}

impl ResolvableConfiguration for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;

    fn resolve(self) -> Result<Self::Resolved> {
        // Validate the file and console level filters.
        EnvFilter::try_new(&self.console_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse the console log level filter."))?;

        EnvFilter::try_new(&self.log_file_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse the log file level filter."))?;


        let log_file_output_directory = match self.log_file_output_directory {
            Some(directory) => {
                std::fs::create_dir_all(&directory)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        miette!(
                            "Failed to create log directory at {}.",
                            directory.display()
                        )
                    })?;

                Some(
                    dunce::canonicalize(&directory)
                        .into_diagnostic()
                        .wrap_err("Failed to canonicalize log directory path.")?,
                )
            }
            None => None,
        };


        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory,
        })
    }
}

impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.console_output_level_filter).into_diagnostic()
    }

    pub fn log_file_output_level_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_file_output_level_filter).into_diagnostic()
    }
}
