//! The configuration model
//!
//! This is what the user provides, and which gets converted into the runtime model. The CLI will
//! override certain aspects of it when running commands.

pub mod source;

mod counter;
mod http;
mod page;

pub use counter::*;
pub use http::*;
pub use page::*;


use anyhow::{bail, Context, Result};
use serde::Deserialize;
use source::Source;
use std::path::PathBuf;
use url::Url;

/// Common configuration model functionality
pub trait ConfigModel {
    /// Migrate legacy constructs to newer ones, if possible
    fn migrate(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The persisted configuration model
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub counter: Counter,

    #[serde(default)]
    pub page: Page,

    #[serde(default)]
    pub http: Http,

    /// The endpoint, as a top level field. Superseded by `counter.endpoint`.
    #[serde(default, alias = "LAMBDA_URL")]
    pub lambda_url: Option<Url>,
}

impl ConfigModel for Configuration {
    /// Run all migration steps.
    ///
    /// NOTE: This will work on the current instance only and will not alter any configuration files
    fn migrate(&mut self) -> Result<()> {
        self.counter.migrate()?;
        self.page.migrate()?;
        self.http.migrate()?;

        // handle the old top level endpoint field
        if let Some(endpoint) = self.lambda_url.take() {
            if self.counter.endpoint.is_some() {
                tracing::warn!(
                    "Both 'lambda_url' and 'counter.endpoint' are set in the configuration. Ignoring 'lambda_url'."
                );
            } else {
                tracing::warn!(
                    "'lambda_url' is used in the configuration. This is deprecated for the 'counter.endpoint' field and will result in an error in a future release."
                );
                self.counter.endpoint = Some(endpoint);
            }
        }

        Ok(())
    }
}

/// Locate and load the configuration, given an optional file or directory. Falling back to the
/// current directory.
pub fn load(path: Option<PathBuf>) -> Result<(Configuration, PathBuf)> {
    match path {
        // if we have a file, load it
        Some(path) if path.is_file() => {
            // Canonicalize the path to the configuration, so that we get a proper parent.
            // Otherwise, we might end up with a parent of '', which won't work later on.
            let path = path.canonicalize().with_context(|| {
                format!(
                    "unable to canonicalize path to configuration: '{}'",
                    path.display()
                )
            })?;
            let Some(cwd) = path.parent() else {
                bail!("unable to get parent directory of '{}'", path.display());
            };
            let cwd = cwd.to_path_buf();

            Ok((Source::File(path).load()?, cwd))
        }
        // if we have a directory, try finding a file and load it
        Some(path) if path.is_dir() => Ok((Source::find(&path).load()?, path)),
        // if we have something else, we can't deal with it
        Some(path) => bail!("{} is neither a file nor a directory", path.display()),
        // if we have nothing, try to find a file in the current directory and load it
        None => {
            let cwd = std::env::current_dir().context("unable to get current directory")?;
            Ok((Source::find(&cwd).load()?, cwd))
        }
    }
}
