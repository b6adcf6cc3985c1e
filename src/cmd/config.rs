use crate::config;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Config controls.
#[derive(Clone, Debug, Args)]
#[command(name = "config")]
pub struct Config {
    #[command(subcommand)]
    action: ConfigSubcommands,
}

impl Config {
    #[tracing::instrument(level = "trace", skip(self, config))]
    pub async fn run(self, config: Option<PathBuf>) -> Result<()> {
        match self.action {
            ConfigSubcommands::Show => {
                let (cfg, working_directory) = config::load(config)?;
                println!("working directory: {}", working_directory.display());
                println!("{cfg:#?}");
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Subcommand)]
enum ConfigSubcommands {
    /// Show the current config pre-CLI.
    Show,
}
