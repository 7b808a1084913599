//! Startup configuration for the ModShot runtime host.
//!
//! Everything interesting lives in [`configuration`]: it turns the compiled-in
//! defaults, the bundled `modshot.json`, the per-user `modshot.json`,
//! environment variables and launch tokens into one immutable
//! [`Configuration`] snapshot.

pub mod configuration;
pub mod logging;

pub use configuration::{
    Configuration,
    ConfigurationCascade,
    ConfigurationError,
    ResolvedConfiguration,
};
