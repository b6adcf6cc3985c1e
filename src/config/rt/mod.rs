//! Runtime configuration
//!
//! The result of the persisted configuration, the CLI overrides, and the defaults.

mod core;
mod counter;
mod update;

pub use self::core::*;
pub use counter::*;
pub use update::*;

use crate::config::Configuration;
use std::path::PathBuf;

/// A runtime configuration, built from a configuration and per-run options.
pub trait RtcBuilder: Sized {
    type Options;

    async fn build(configuration: Configuration, options: Self::Options) -> anyhow::Result<Self>;

    /// Build the runtime configuration, deriving the options from the configuration.
    async fn from_config<F>(
        configuration: Configuration,
        working_directory: PathBuf,
        f: F,
    ) -> anyhow::Result<Self>
    where
        F: FnOnce(&Configuration, CoreOptions) -> Self::Options,
    {
        let options = f(&configuration, CoreOptions { working_directory });
        Self::build(configuration, options).await
    }
}
