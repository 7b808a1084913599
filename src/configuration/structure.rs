use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

pub use self::audio::{AudioConfiguration, MidiConfiguration};
pub use self::bindings::BindingNames;
pub use self::display::{DisplayConfiguration, IntegerScalingConfiguration};
pub use self::game::GameMetadata;
pub use self::launch::{EditorFlags, LaunchConfiguration};
pub use self::logging::{LoggingConfiguration, UnresolvedLoggingConfiguration};
pub use self::paths::PathsConfiguration;
pub use self::scripting::{JitConfiguration, ScriptingConfiguration};
use super::cascade::CascadeDiagnostic;

mod audio;
mod bindings;
mod display;
mod game;
mod launch;
mod logging;
mod paths;
mod scripting;



/// The entire resolved configuration.
///
/// Every field holds a schema value even when no external source could be read.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// RGSS version, clamped to `0..=3`.
    pub rgss_version: i32,

    /// `debugMode` from the documents (not the `debug` launch token).
    pub debug_mode: bool,

    /// Fixed title and script archive of the game.
    pub game: GameMetadata,

    /// Game folder, data path identity and resource paths.
    pub paths: PathsConfiguration,

    /// Window, scaling and frame pacing.
    pub display: DisplayConfiguration,

    /// MIDI synthesis and sound effect sources.
    pub audio: AudioConfiguration,

    /// Script loading and JIT tuning.
    pub scripting: ScriptingConfiguration,

    /// Display names of the eight input actions.
    pub bindings: BindingNames,

    /// Launch mode, pass-through arguments and environment toggles.
    pub launch: LaunchConfiguration,
}


/// A diagnostic-carrying, read-only view of one completed cascade.
#[derive(Debug, Clone)]
pub struct ResolvedConfiguration {
    configuration: Configuration,

    raw_document: Value,

    diagnostics: Vec<CascadeDiagnostic>,
}

impl ResolvedConfiguration {
    pub(crate) fn new(
        configuration: Configuration,
        raw_document: Value,
        diagnostics: Vec<CascadeDiagnostic>,
    ) -> Self {
        Self {
            configuration,
            raw_document,
            diagnostics,
        }
    }

    /// The strongly-typed configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The fully merged document the configuration was extracted from.
    pub fn raw_document(&self) -> &Value {
        &self.raw_document
    }

    /// Soft failures recorded while resolving (unreadable sources, rejected keys).
    pub fn diagnostics(&self) -> &[CascadeDiagnostic] {
        &self.diagnostics
    }

    /// Hands out the configuration for sharing between subsystems.
    pub fn into_shared(self) -> Arc<Configuration> {
        Arc::new(self.configuration)
    }
}
