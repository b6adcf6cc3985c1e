use crate::{
    config::{
        self,
        rt::{CounterOptions, RtcBuilder, RtcCounter},
        Configuration,
    },
    counter::Console,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Fetch the view count and print the text which would be rendered.
#[derive(Clone, Debug, Args)]
#[command(name = "fetch")]
pub struct Fetch {
    #[command(flatten)]
    pub core: super::core::Core,
}

impl Fetch {
    /// apply CLI overrides to the configuration
    pub fn apply_to(self, config: Configuration) -> Result<Configuration> {
        self.core.apply_to(config)
    }

    #[tracing::instrument(level = "trace", skip(self, config))]
    pub async fn run(self, config: Option<PathBuf>) -> Result<()> {
        let (cfg, working_directory) = config::load(config)?;

        let cfg = self.apply_to(cfg)?;
        let cfg = RtcCounter::from_config(cfg, working_directory, |_, core| CounterOptions {
            core,
        })
        .await?;

        let updater = cfg.updater().await?;
        updater.update_counter(&mut Console::stdout()).await;

        Ok(())
    }
}
