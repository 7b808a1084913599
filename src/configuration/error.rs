use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;


/// Failures that abort configuration resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("Unable to switch into gameFolder {}", .path.display())]
    #[diagnostic(
        code(modshot::configuration::game_folder),
        help("Check `gameFolder` in modshot.json; it is resolved relative to the directory the host was started from.")
    )]
    GameFolderUnavailable {
        path: PathBuf,

        #[source]
        source: io::Error,
    },
}


/// Reasons a configuration document could not be used.
///
/// These never abort startup; the document is treated as empty.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("could not read {}", .path.display())]
    #[diagnostic(code(modshot::configuration::read))]
    Read {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 or {encoding} (unknown encoding)", .path.display())]
    #[diagnostic(code(modshot::configuration::encoding))]
    Encoding {
        path: PathBuf,

        /// The encoding detection settled on.
        encoding: &'static str,
    },

    #[error("failed to parse {}", .path.display())]
    #[diagnostic(code(modshot::configuration::parse))]
    Parse {
        path: PathBuf,

        #[source]
        source: json5::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Encoding { path, .. }
            | LoadError::Parse { path, .. } => path,
        }
    }
}
