use crate::config::models::ConfigModel;
use serde::Deserialize;
use std::path::PathBuf;

/// Config options for the page containing the counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// The HTML file to update [default: index.html]
    #[serde(default)]
    pub target: Option<PathBuf>,

    /// Where to write the updated page [default: the target itself]
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl ConfigModel for Page {}
