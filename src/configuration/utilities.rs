use std::{env::current_dir, io, path::{Path, PathBuf}};

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::warn;

use super::error::ConfigurationError;
use super::traits::PreferencePathProvider;


/// Returns the directory the host was started from, which is where the bundled
/// `modshot.json` is looked up.
pub fn get_default_start_directory() -> Result<PathBuf> {
    current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))
}


/// Resolves `game_folder` against `start_directory` into a canonical directory path.
/// Absolute game folders are used as they are.
pub fn resolve_game_root(
    start_directory: &Path,
    game_folder: &str,
) -> Result<PathBuf, ConfigurationError> {
    let game_folder_path = start_directory.join(game_folder);

    if !game_folder_path.is_dir() {
        let kind = if game_folder_path.exists() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };

        return Err(ConfigurationError::GameFolderUnavailable {
            source: io::Error::new(kind, "game folder is not a directory"),
            path: game_folder_path,
        });
    }

    dunce::canonicalize(&game_folder_path).map_err(|source| {
        ConfigurationError::GameFolderUnavailable {
            path: game_folder_path,
            source,
        }
    })
}


/// Per-user data directory under the platform data directory
/// (`$XDG_DATA_HOME`, `~/Library/Application Support`, `%APPDATA%`),
/// created on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformDataDirectory;

impl PreferencePathProvider for PlatformDataDirectory {
    fn preference_path(&self, organization: &str, application: &str) -> Option<PathBuf> {
        let mut path = dirs::data_dir()?;

        if !organization.is_empty() {
            path.push(organization);
        }
        path.push(application);

        match std::fs::create_dir_all(&path) {
            Ok(()) => Some(path),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    "Could not create the user data directory: {}", error
                );
                None
            }
        }
    }
}


/// A preference path chosen by the caller, independent of the identity strings.
#[derive(Debug, Clone)]
pub struct FixedPreferencePath {
    path: PathBuf,
}

impl FixedPreferencePath {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl PreferencePathProvider for FixedPreferencePath {
    fn preference_path(&self, _organization: &str, _application: &str) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}
