//! Command-line interface definitions for the host binary.

use std::path::PathBuf;

use clap::Parser;



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "modshot-config",
    author,
    about = "Resolves the ModShot startup configuration and prints it.",
    version
)]
pub struct CLIArgs {
    /// Directory the bundled `modshot.json` is read from and `gameFolder` is
    /// resolved against. If unspecified, this defaults to the current directory.
    #[arg(
        long = "start-directory",
        help = "Directory containing the bundled modshot.json. Defaults to the current directory."
    )]
    pub start_directory: Option<PathBuf>,

    #[arg(
        long = "user-data-directory",
        help = "Use this directory instead of the platform data directory for the user modshot.json."
    )]
    pub user_data_directory: Option<PathBuf>,

    #[arg(
        long = "print-raw",
        help = "Print the merged configuration document instead of the resolved configuration."
    )]
    pub print_raw: bool,

    #[arg(
        long = "console-log-level",
        default_value = "info",
        help = "Console log filter (tracing EnvFilter syntax)."
    )]
    pub console_log_level: String,

    #[arg(
        long = "log-file-level",
        default_value = "debug",
        help = "Log file filter (tracing EnvFilter syntax). Only used with --log-directory."
    )]
    pub log_file_level: String,

    #[arg(
        long = "log-directory",
        help = "Also write logs to modshot-config.log in this directory."
    )]
    pub log_directory: Option<PathBuf>,

    /// Opaque launch tokens, as the editor would pass them (`debug`, `btest`, ...).
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Launch tokens passed to the game (e.g. debug, btest)."
    )]
    pub launch_tokens: Vec<String>,
}
