use crate::config::{types::ConfigDuration, Configuration};
use clap::Args;
use std::path::PathBuf;
use url::Url;

/// Counter options
#[derive(Clone, Debug, Default, Args)]
#[command(next_help_heading = "Counter")]
pub struct Core {
    /// The endpoint returning the view count
    #[arg(long, env = "VIEW_COUNTER_ENDPOINT")]
    pub endpoint: Option<Url>,

    /// The selector of the element displaying the count
    #[arg(long)]
    pub selector: Option<String>,

    /// Abort the request after this duration, e.g. "10s"
    #[arg(long)]
    pub timeout: Option<ConfigDuration>,

    /// Treat non-success status codes as errors, instead of rendering the body
    #[arg(long)]
    pub check_status: Option<bool>,

    /// Allows request to ignore certificate validation errors.
    ///
    /// Can be useful when behind a corporate proxy.
    #[arg(long)]
    pub accept_invalid_certs: Option<bool>,

    /// When desired, set a custom root certificate chain (PEM)
    #[arg(long)]
    pub root_certificate: Option<PathBuf>,
}

impl Core {
    /// apply CLI overrides to the configuration
    pub fn apply_to(self, mut config: Configuration) -> anyhow::Result<Configuration> {
        let Self {
            endpoint,
            selector,
            timeout,
            check_status,
            accept_invalid_certs,
            root_certificate,
        } = self;

        config.counter.endpoint = endpoint.or(config.counter.endpoint);
        config.counter.selector = selector.or(config.counter.selector);

        config.http.timeout = timeout.or(config.http.timeout);
        config.http.check_status = check_status.unwrap_or(config.http.check_status);
        config.http.accept_invalid_certs =
            accept_invalid_certs.unwrap_or(config.http.accept_invalid_certs);
        config.http.root_certificate = root_certificate.or(config.http.root_certificate);

        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cli_overrides_config() {
        let mut config = Configuration::default();
        config.counter.selector = Some(".from-config".into());
        config.http.check_status = true;

        let core = Core {
            endpoint: Some(Url::parse("http://localhost:9000/").expect("valid url")),
            timeout: Some(ConfigDuration(Duration::from_secs(3))),
            check_status: Some(false),
            ..Default::default()
        };
        let config = core.apply_to(config).expect("must apply");

        assert_eq!(
            config.counter.endpoint.map(|u| u.to_string()).as_deref(),
            Some("http://localhost:9000/")
        );
        assert_eq!(config.counter.selector.as_deref(), Some(".from-config"));
        assert_eq!(config.http.timeout, Some(ConfigDuration(Duration::from_secs(3))));
        assert!(!config.http.check_status);
    }
}
