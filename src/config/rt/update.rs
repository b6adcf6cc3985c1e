use crate::config::{
    rt::{CounterOptions, RtcBuilder, RtcCounter},
    Configuration, Page,
};
use std::{ops::Deref, path::PathBuf};

/// Runtime config for updating a page.
#[derive(Clone, Debug)]
pub struct RtcUpdate {
    pub counter: RtcCounter,
    /// The HTML file containing the counter element.
    pub target: PathBuf,
    /// Where the updated page is written to.
    pub output: PathBuf,
}

impl Deref for RtcUpdate {
    type Target = RtcCounter;

    fn deref(&self) -> &Self::Target {
        &self.counter
    }
}

/// Runtime config options, on a per-run basis.
#[derive(Clone, Debug)]
pub struct UpdateOptions {
    pub counter: CounterOptions,
}

impl RtcUpdate {
    pub(crate) fn new(config: Configuration, opts: UpdateOptions) -> anyhow::Result<Self> {
        let UpdateOptions { counter: counter_opts } = opts;

        let Page { target, output } = config.page.clone();
        let counter = RtcCounter::new(config, counter_opts)?;

        let target = counter.resolve(target.unwrap_or_else(|| PathBuf::from("index.html")));
        let output = match output {
            Some(output) => counter.resolve(output),
            None => target.clone(),
        };

        Ok(Self {
            counter,
            target,
            output,
        })
    }
}

impl RtcBuilder for RtcUpdate {
    type Options = UpdateOptions;

    async fn build(configuration: Configuration, options: Self::Options) -> anyhow::Result<Self> {
        Self::new(configuration, options)
    }
}
