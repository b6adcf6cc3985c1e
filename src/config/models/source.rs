use crate::config::{models::ConfigModel, Configuration};
use anyhow::{bail, Context};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// A configuration source
#[derive(Debug)]
pub enum Source {
    /// A configuration file (maybe TOML, YAML or JSON)
    File(PathBuf),
    /// No configuration file, all defaults
    Default,
}

const CANDIDATES: &[&str] = &[
    "ViewCounter.toml",
    ".view-counter.toml",
    "ViewCounter.yaml",
    ".view-counter.yaml",
    "ViewCounter.json",
    ".view-counter.json",
];

impl Source {
    /// Find a first config source candidate in a directory
    pub fn find(path: &Path) -> Source {
        CANDIDATES
            .iter()
            .find_map(|name| check_path(path, name))
            .map(Source::File)
            .unwrap_or(Source::Default)
    }

    /// Load the configuration from the source.
    ///
    /// This will validate and migrate anything that's required. It does not store any migrations.
    pub fn load(self) -> anyhow::Result<Configuration> {
        match self {
            Self::File(file) => {
                tracing::debug!("loading configuration from '{}'", file.display());
                load_from(&file)
                    .with_context(|| format!("error loading configuration '{}'", file.display()))
            }
            Self::Default => {
                tracing::debug!("no configuration file found, using defaults");
                Ok(Configuration::default())
            }
        }
        .and_then(|mut cfg| {
            cfg.migrate()?;
            Ok(cfg)
        })
    }
}

/// Load configuration from a file
///
/// Currently supported formats are:
///
/// * TOML
/// * YAML
/// * JSON
fn load_from(file: &Path) -> anyhow::Result<Configuration> {
    match file.extension().map(|s| s.to_string_lossy()).as_deref() {
        Some("toml") => Ok(toml::from_str(&std::fs::read_to_string(file)?)?),
        Some("yaml") => Ok(serde_yaml::from_reader(BufReader::new(File::open(file)?))?),
        Some("json") => Ok(serde_json::from_reader(BufReader::new(File::open(file)?))?),

        Some(n) => {
            bail!("Unsupported configuration file type: {n}");
        }
        None => {
            bail!("Missing configuration file extension");
        }
    }
}

/// Check if a file can be found in a directory.
fn check_path(path: &Path, name: &str) -> Option<PathBuf> {
    let path = path.join(name);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}
