use std::path::PathBuf;

use miette::Result;

/// Represents a configuration that can be validated or resolved.
pub trait ResolvableConfiguration {
    type Resolved;

    /// Resolve the configuration into its `Resolved` type.
    /// If the resolution / validation fails, you may return `Err` to indicate
    /// that the configuration is invalid.
    fn resolve(self) -> Result<Self::Resolved>;
}


/// Source of environment variables consulted by the cascade.
pub trait EnvironmentSource {
    /// Returns the value of `name`, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;
}


/// Locates the per-user data directory for an (organization, application) pair.
pub trait PreferencePathProvider {
    /// Returns `None` if the platform has no such directory or it cannot be created.
    fn preference_path(&self, organization: &str, application: &str) -> Option<PathBuf>;
}
