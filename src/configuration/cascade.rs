//! The cascade orchestrator.
//!
//! Sources are applied once, in a fixed order:
//! 1. Schema defaults
//! 2. Launch tokens (editor mode, pass-through arguments)
//! 3. Bundled `modshot.json` next to the host (nested objects merged key by key)
//! 4. Early extraction (paths, identity, JIT, RGSS version, screen size)
//! 5. Game folder resolution (the only fatal step)
//! 6. Per-user `modshot.json` in the preference path
//! 7. Late extraction (everything else)
//! 8. Environment variables
//! 9. Derived values and clamping

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::derivation::apply_derived_values;
use super::document::ConfigDocument;
use super::error::ConfigurationError;
use super::extraction::{extract_all, extract_stage};
use super::loader::{describe_load_error, load_document_reporting};
use super::merge::{merge_into, merge_with_nested_objects, MergeDiagnostic};
use super::overrides::{
    bool_from_env,
    classify_launch_tokens,
    ProcessEnvironment,
    BIG_PICTURE_VARIABLE,
    CONSOLE_VISIBLE_VARIABLE,
    FOLDER_SELECT_VARIABLE,
    NATIVE_RENDERER_VARIABLE,
};
use super::schema::{defaults_document, ExtractionStage, FieldGate};
use super::structure::{Configuration, GameMetadata, ResolvedConfiguration};
use super::traits::{EnvironmentSource, PreferencePathProvider};
use super::utilities::{resolve_game_root, PlatformDataDirectory};


/// File name of both the bundled and the per-user configuration document.
pub const CONFIGURATION_FILE_NAME: &str = "modshot.json";


/// Which document a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    Bundled,
    User,
}

impl Display for DocumentSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Bundled => f.write_str("bundled"),
            DocumentSource::User => f.write_str("user"),
        }
    }
}


/// A soft failure recorded during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeDiagnostic {
    /// The document existed but could not be decoded or parsed.
    UnreadableDocument {
        document: DocumentSource,
        path: PathBuf,
        reason: String,
    },

    /// A value was dropped because its kind does not match the schema.
    RejectedValue {
        document: DocumentSource,
        diagnostic: MergeDiagnostic,
    },
}


/// Platform features some overrides depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// The native (Metal) renderer is available and its preference is honoured.
    pub native_renderer: bool,

    /// The Big Picture fullscreen override is compiled in.
    pub big_picture_override: bool,
}

impl PlatformCapabilities {
    /// Capabilities of the platform this binary was built for.
    pub fn current() -> Self {
        Self {
            native_renderer: cfg!(target_os = "macos"),
            big_picture_override: cfg!(feature = "steam"),
        }
    }

    pub fn allows(&self, gate: FieldGate) -> bool {
        match gate {
            FieldGate::Always => true,
            FieldGate::NativeRenderer => self.native_renderer,
        }
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::current()
    }
}


/// One configuration resolution, set up with its inputs.
pub struct ConfigurationCascade {
    start_directory: PathBuf,

    launch_tokens: Vec<String>,

    environment: Box<dyn EnvironmentSource>,

    preference_paths: Box<dyn PreferencePathProvider>,

    platform: PlatformCapabilities,
}

impl ConfigurationCascade {
    /// Sets up a cascade reading the process environment and the platform data directory.
    ///
    /// `launch_tokens` is the full argument vector, program name first.
    pub fn new<P, I, S>(start_directory: P, launch_tokens: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_directory: start_directory.into(),
            launch_tokens: launch_tokens.into_iter().map(Into::into).collect(),
            environment: Box::new(ProcessEnvironment),
            preference_paths: Box::new(PlatformDataDirectory),
            platform: PlatformCapabilities::current(),
        }
    }

    pub fn with_environment<E>(mut self, environment: E) -> Self
    where
        E: EnvironmentSource + 'static,
    {
        self.environment = Box::new(environment);
        self
    }

    pub fn with_preference_paths<R>(mut self, preference_paths: R) -> Self
    where
        R: PreferencePathProvider + 'static,
    {
        self.preference_paths = Box::new(preference_paths);
        self
    }

    pub fn with_platform(mut self, platform: PlatformCapabilities) -> Self {
        self.platform = platform;
        self
    }

    pub fn bundled_document_path(&self) -> PathBuf {
        self.start_directory.join(CONFIGURATION_FILE_NAME)
    }


    /// Runs the cascade.
    ///
    /// Fails only if the game folder cannot be resolved; every other problem
    /// is logged, recorded as a diagnostic and falls back to earlier values.
    pub fn resolve(self) -> Result<ResolvedConfiguration, ConfigurationError> {
        info!(
            start_directory = %self.start_directory.display(),
            "Resolving configuration."
        );

        let mut diagnostics = Vec::new();

        let mut working_document = defaults_document();
        let mut configuration = Configuration::default();
        extract_all(&working_document, &mut configuration);


        let launch = classify_launch_tokens(self.launch_tokens.as_slice());
        configuration.launch.editor = launch.editor;
        configuration.launch.arguments = launch.arguments;
        debug!(editor = ?configuration.launch.editor, "Classified launch tokens.");


        let bundled_path = self.bundled_document_path();
        let bundled_document =
            load_source(DocumentSource::Bundled, &bundled_path, &mut diagnostics);
        merge_source(
            DocumentSource::Bundled,
            &mut working_document,
            &bundled_document,
            &mut diagnostics,
        );


        extract_stage(
            &working_document,
            ExtractionStage::Early,
            |gate| self.platform.allows(gate),
            &mut configuration,
        );
        apply_game_metadata(&mut configuration, GameMetadata::builtin());


        configuration.paths.game_root =
            self.resolve_game_root(&configuration.paths.game_folder)?;
        debug!(
            game_root = %configuration.paths.game_root.display(),
            "Resolved game folder."
        );


        let custom_data_path = self.preference_paths.preference_path(
            &configuration.paths.data_path_org,
            &configuration.paths.data_path_app,
        );

        match &custom_data_path {
            Some(data_path) => {
                let user_path = data_path.join(CONFIGURATION_FILE_NAME);
                let user_document =
                    load_source(DocumentSource::User, &user_path, &mut diagnostics);
                merge_source(
                    DocumentSource::User,
                    &mut working_document,
                    &user_document,
                    &mut diagnostics,
                );

                configuration.paths.user_configuration_path = Some(user_path);
            }
            None => warn!(
                organization = %configuration.paths.data_path_org,
                application = %configuration.paths.data_path_app,
                "No user data directory available, skipping the user configuration."
            ),
        }
        configuration.paths.custom_data_path = custom_data_path;


        extract_stage(
            &working_document,
            ExtractionStage::Late,
            |gate| self.platform.allows(gate),
            &mut configuration,
        );

        self.apply_environment_overrides(&mut configuration);

        apply_derived_values(&mut configuration);


        info!(
            rgss_version = configuration.rgss_version,
            diagnostics = diagnostics.len(),
            "Configuration resolved."
        );

        Ok(ResolvedConfiguration::new(
            configuration,
            Value::Object(working_document),
            diagnostics,
        ))
    }

    fn resolve_game_root(&self, game_folder: &str) -> Result<PathBuf, ConfigurationError> {
        if game_folder.is_empty() {
            return Ok(dunce::canonicalize(&self.start_directory)
                .unwrap_or_else(|_| self.start_directory.clone()));
        }

        resolve_game_root(&self.start_directory, game_folder)
    }

    fn apply_environment_overrides(&self, configuration: &mut Configuration) {
        let environment = self.environment.as_ref();
        let launch = &mut configuration.launch;
        let display = &mut configuration.display;

        launch.console_visible =
            bool_from_env(environment, CONSOLE_VISIBLE_VARIABLE, launch.editor.debug);

        if self.platform.native_renderer {
            display.prefer_metal_renderer = bool_from_env(
                environment,
                NATIVE_RENDERER_VARIABLE,
                display.prefer_metal_renderer,
            );
        }

        launch.manual_folder_select = bool_from_env(environment, FOLDER_SELECT_VARIABLE, false);

        if self.platform.big_picture_override
            && bool_from_env(environment, BIG_PICTURE_VARIABLE, false)
        {
            debug!("Big Picture mode detected, forcing fullscreen.");
            display.fullscreen = true;
        }
    }
}


/// Applies the fixed game metadata and fills in an empty data path identity from it.
fn apply_game_metadata(configuration: &mut Configuration, game: GameMetadata) {
    let paths = &mut configuration.paths;

    if paths.data_path_org.is_empty() {
        paths.data_path_org = ".".to_string();
    }

    if paths.data_path_app.is_empty() {
        paths.data_path_app.clone_from(&game.title);
    }

    configuration.game = game;
}

fn load_source(
    document: DocumentSource,
    path: &Path,
    diagnostics: &mut Vec<CascadeDiagnostic>,
) -> Value {
    load_document_reporting(path, |error| {
        diagnostics.push(CascadeDiagnostic::UnreadableDocument {
            document,
            path: error.path().clone(),
            reason: describe_load_error(&error),
        });
    })
}

fn merge_source(
    document: DocumentSource,
    working_document: &mut ConfigDocument,
    source: &Value,
    diagnostics: &mut Vec<CascadeDiagnostic>,
) {
    let mut merge_diagnostics = Vec::new();

    // Nested objects are only descended into for the bundled document.
    let assigned = match document {
        DocumentSource::Bundled => {
            merge_with_nested_objects(working_document, source, &mut merge_diagnostics)
        }
        DocumentSource::User => merge_into(working_document, source, "", &mut merge_diagnostics),
    };

    debug!(%document, assigned, "Merged configuration document.");

    diagnostics.extend(
        merge_diagnostics
            .into_iter()
            .map(|diagnostic| CascadeDiagnostic::RejectedValue { document, diagnostic }),
    );
}
