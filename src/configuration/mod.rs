//! This module contains all configuration-relevant code: the schema of
//! recognised keys, the documents they are read from, and the cascade that
//! turns them into one [`Configuration`].
//!
//! Your starting point should probably be [`ConfigurationCascade::resolve`].
//!
//! # Internals
//! Resolution works on an untyped working document (a JSON object) that starts
//! out as the schema defaults. Each source document is merged into it under a
//! closed schema: unknown keys are ignored and values whose kind differs from
//! the default's kind are rejected. Fields are then extracted from the working
//! document into the typed [`Configuration`], keeping their previous value
//! whenever extraction is not possible.
//!
//! The only fatal condition is a game folder that cannot be resolved, see
//! [`ConfigurationError`].

mod cascade;
mod derivation;
mod document;
mod error;
mod extraction;
mod loader;
mod merge;
mod overrides;
mod schema;
mod structure;
mod traits;
mod utilities;

pub use cascade::{
    CascadeDiagnostic,
    ConfigurationCascade,
    DocumentSource,
    PlatformCapabilities,
    CONFIGURATION_FILE_NAME,
};
pub use derivation::{apply_derived_values, default_screen_size};
pub use document::{ConfigDocument, Kind};
pub use error::{ConfigurationError, LoadError};
pub use extraction::{
    extract_boolean,
    extract_boolean_like,
    extract_integer,
    extract_string,
    extract_string_list,
};
pub use loader::{load_document, try_load_document, LoadedDocument};
pub use merge::{merge_into, merge_with_nested_objects, MergeDiagnostic};
pub use overrides::{
    bool_from_env,
    classify_launch_tokens,
    LaunchTokens,
    ProcessEnvironment,
    BIG_PICTURE_VARIABLE,
    CONSOLE_VISIBLE_VARIABLE,
    FOLDER_SELECT_VARIABLE,
    NATIVE_RENDERER_VARIABLE,
};
pub use schema::{defaults_document, BINDING_NAMES_OBJECT};
pub use structure::*;
pub use traits::{EnvironmentSource, PreferencePathProvider, ResolvableConfiguration};
pub use utilities::{get_default_start_directory, FixedPreferencePath, PlatformDataDirectory};
