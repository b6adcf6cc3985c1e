use crate::{
    common::html_rewrite::parse_selector,
    config::{
        rt::{CoreOptions, RtcBuilder, RtcCore},
        types::ConfigDuration,
        Configuration, Counter, Http,
    },
    counter::{HttpOptions, HttpSource, ViewCounterUpdater, DEFAULT_SELECTOR},
};
use anyhow::Context;
use std::ops::Deref;
use url::Url;

/// The endpoint queried when none is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://rmyu4najdt5mk64rbopguj2sku0pjpso.lambda-url.ap-south-1.on.aws/";

/// Runtime config for fetching and rendering the counter.
#[derive(Clone, Debug)]
pub struct RtcCounter {
    pub core: RtcCore,
    /// The endpoint returning the view count.
    pub endpoint: Url,
    /// The selector of the element displaying the count.
    pub selector: String,
    /// Options for the HTTP client.
    pub http: HttpOptions,
}

impl Deref for RtcCounter {
    type Target = RtcCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

/// Runtime config options, on a per-run basis.
#[derive(Clone, Debug)]
pub struct CounterOptions {
    pub core: CoreOptions,
}

impl RtcCounter {
    pub(crate) fn new(config: Configuration, opts: CounterOptions) -> anyhow::Result<Self> {
        let CounterOptions { core: core_opts } = opts;

        let Configuration {
            counter: Counter { endpoint, selector },
            http:
                Http {
                    timeout,
                    check_status,
                    accept_invalid_certs,
                    root_certificate,
                },
            ..
        } = config;

        let core = RtcCore::new(core_opts);

        let endpoint = match endpoint {
            Some(endpoint) => endpoint,
            None => Url::parse(DEFAULT_ENDPOINT).context("invalid default endpoint")?,
        };

        let selector = selector.unwrap_or_else(|| DEFAULT_SELECTOR.to_string());
        parse_selector(&selector)?;

        let http = HttpOptions {
            timeout: timeout.map(|ConfigDuration(timeout)| timeout),
            check_status,
            accept_invalid_certs,
            root_certificate: root_certificate.map(|path| core.resolve(path)),
        };

        Ok(Self {
            core,
            endpoint,
            selector,
            http,
        })
    }

    /// Create the updater, talking to the configured endpoint.
    pub async fn updater(&self) -> anyhow::Result<ViewCounterUpdater<HttpSource>> {
        let source = HttpSource::new(self.endpoint.clone(), &self.http).await?;
        Ok(ViewCounterUpdater::new(source, self.selector.clone()))
    }
}

impl RtcBuilder for RtcCounter {
    type Options = CounterOptions;

    async fn build(configuration: Configuration, options: Self::Options) -> anyhow::Result<Self> {
        Self::new(configuration, options)
    }
}
