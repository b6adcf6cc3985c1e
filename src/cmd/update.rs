use crate::{
    common::{ERROR, SUCCESS},
    config::{
        self,
        rt::{CounterOptions, RtcBuilder, RtcUpdate, UpdateOptions},
        Configuration,
    },
    counter::{HtmlPage, Outcome},
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Fetch the view count and render it into the page.
#[derive(Clone, Debug, Args)]
#[command(name = "update")]
#[command(next_help_heading = "Update")]
pub struct Update {
    /// The HTML file containing the counter element [default: index.html]
    pub target: Option<PathBuf>,

    /// Write the updated page here, instead of overwriting the target
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    // NOTE: flattened structures come last
    #[command(flatten)]
    pub core: super::core::Core,
}

impl Update {
    /// apply CLI overrides to the configuration
    pub fn apply_to(self, mut config: Configuration) -> Result<Configuration> {
        let Self {
            target,
            output,
            core,
        } = self;

        config.page.target = target.or(config.page.target);
        config.page.output = output.or(config.page.output);

        core.apply_to(config)
    }

    #[tracing::instrument(level = "trace", skip(self, config))]
    pub async fn run(self, config: Option<PathBuf>) -> Result<()> {
        let (cfg, working_directory) = config::load(config)?;

        let cfg = self.apply_to(cfg)?;
        let cfg = RtcUpdate::from_config(cfg, working_directory, |_, core| UpdateOptions {
            counter: CounterOptions { core },
        })
        .await?;

        let updater = cfg.updater().await?;
        let mut page = HtmlPage::open(&cfg.target).await;
        let outcome = updater.update_counter(&mut page).await;

        if let Outcome::Unwritten { write_error, .. } = &outcome {
            tracing::warn!(
                "{}'{}' was left unchanged: {}",
                ERROR,
                page.path().display(),
                write_error
            );
            return Ok(());
        }

        if page.persist(&cfg.output).await? {
            let text = outcome.text().unwrap_or_default();
            match outcome.error() {
                None => {
                    tracing::info!("{}wrote '{}' to '{}'", SUCCESS, text, cfg.output.display())
                }
                Some(error) => tracing::warn!(
                    "wrote '{}' to '{}' after: {}",
                    text,
                    cfg.output.display(),
                    error
                ),
            }
        }

        Ok(())
    }
}
