use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::configuration::error::ConfigurationError;


#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct PathsConfiguration {
    /// `gameFolder` exactly as the documents gave it.
    pub game_folder: String,

    /// Canonical absolute path of the game folder.
    /// All game-relative lookups are resolved against this.
    pub game_root: PathBuf,

    pub data_path_org: String,

    pub data_path_app: String,

    pub icon_path: String,

    pub exec_name: String,

    pub allow_symlinks: bool,

    pub path_cache: bool,

    /// Run-time packages (`RTP`).
    pub rtps: Vec<String>,

    /// Per-user data directory, if the platform provided one.
    pub custom_data_path: Option<PathBuf>,

    /// Location the per-user `modshot.json` was looked up at.
    pub user_configuration_path: Option<PathBuf>,
}

impl PathsConfiguration {
    /// Resolves a game-relative path against the game root.
    /// Absolute paths are returned unchanged.
    pub fn resolve_in_game_folder<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.game_root.join(relative_path)
    }

    /// Switches the process working directory into the game root.
    ///
    /// Code that still opens game files through relative paths relies on this
    /// having happened once at startup.
    pub fn enter_game_folder(&self) -> Result<(), ConfigurationError> {
        std::env::set_current_dir(&self.game_root).map_err(|error| {
            ConfigurationError::GameFolderUnavailable {
                path: self.game_root.clone(),
                source: error,
            }
        })?;

        info!(
            game_root = %self.game_root.display(),
            "Switched working directory into the game folder."
        );

        Ok(())
    }
}
