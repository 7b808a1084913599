use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing::{info, warn};

use modshot_config::{
    configuration::{
        get_default_start_directory,
        CascadeDiagnostic,
        FixedPreferencePath,
        ResolvableConfiguration,
        UnresolvedLoggingConfiguration,
    },
    logging::initialize_tracing,
    ConfigurationCascade,
};

use crate::cli::CLIArgs;

mod cli;


const PROGRAM_NAME: &str = "modshot";


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let logging = UnresolvedLoggingConfiguration {
        console_output_level_filter: cli_args.console_log_level.clone(),
        log_file_output_level_filter: cli_args.log_file_level.clone(),
        log_file_output_directory: cli_args.log_directory.clone(),
    }
    .resolve()
    .wrap_err("Failed to resolve logging options.")?;

    let logging_raii_guard = initialize_tracing(&logging, "modshot-config.log")
        .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    let start_directory = match cli_args.start_directory {
        Some(start_directory) => start_directory,
        None => get_default_start_directory()?,
    };

    // The cascade expects the whole argument vector, program name first.
    let launch_tokens = std::iter::once(PROGRAM_NAME.to_string()).chain(cli_args.launch_tokens);

    let mut cascade = ConfigurationCascade::new(start_directory, launch_tokens);
    if let Some(user_data_directory) = cli_args.user_data_directory {
        cascade = cascade.with_preference_paths(FixedPreferencePath::new(user_data_directory));
    }

    let resolved = cascade
        .resolve()
        .wrap_err("Failed to resolve configuration.")?;

    for diagnostic in resolved.diagnostics() {
        match diagnostic {
            CascadeDiagnostic::UnreadableDocument { document, reason, .. } => {
                warn!(%document, "Ignored configuration document: {}", reason);
            }
            CascadeDiagnostic::RejectedValue { document, diagnostic } => {
                warn!(%document, "Ignored configuration value: {}", diagnostic);
            }
        }
    }

    resolved
        .configuration()
        .paths
        .enter_game_folder()
        .wrap_err("Failed to enter the game folder.")?;


    let output = if cli_args.print_raw {
        serde_json::to_string_pretty(resolved.raw_document())
    } else {
        serde_json::to_string_pretty(resolved.configuration())
    }
    .into_diagnostic()
    .wrap_err("Failed to serialize configuration.")?;

    println!("{}", output);


    drop(logging_raii_guard);
    Ok(())
}
