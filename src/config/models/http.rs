use crate::config::{models::ConfigModel, types::ConfigDuration};
use serde::Deserialize;
use std::path::PathBuf;

/// Config options for the HTTP client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Http {
    /// Abort the request after this duration, e.g. "10s" [default: no timeout]
    #[serde(default)]
    pub timeout: Option<ConfigDuration>,

    /// Treat non-success status codes as errors [default: false]
    ///
    /// By default any response with a JSON body is rendered, whatever its status.
    #[serde(default)]
    pub check_status: bool,

    /// Allow invalid certificates, e.g. when behind a corporate proxy [default: false]
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// An additional root certificate chain in PEM format
    #[serde(default)]
    pub root_certificate: Option<PathBuf>,
}

impl ConfigModel for Http {}
