#![deny(clippy::unwrap_used)]

mod cmd;
mod common;
mod config;
mod counter;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use common::STARTING;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ViewCounter::parse();

    #[cfg(windows)]
    if let Err(err) = nu_ansi_term::enable_ansi_support() {
        eprintln!("error enabling ANSI support: {:?}", err);
    }

    tracing_subscriber::registry()
        // Filter spans based on the verbosity flags.
        .with(eval_logging(&cli))
        // Diagnostics go to stderr, keeping stdout for rendered output.
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        // Install this registry as the global tracing registry.
        .try_init()
        .context("error initializing logging")?;

    tracing::info!(
        "{}Starting {} {}",
        STARTING,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    cli.run().await
}

fn eval_logging(cli: &ViewCounter) -> tracing_subscriber::EnvFilter {
    let directives = match (cli.verbose, cli.quiet) {
        // quiet overrides verbose
        (_, true) => "error,view_counter=warn",
        // increase verbosity
        (0, false) => "error,view_counter=info",
        (1, false) => "error,view_counter=debug",
        (_, false) => "error,view_counter=trace",
    };
    tracing_subscriber::EnvFilter::new(directives)
}

/// Fetch a page's view count and render it into the page.
#[derive(Parser)]
#[command(about, author, version)]
struct ViewCounter {
    #[command(subcommand)]
    action: ViewCounterSubcommands,
    /// Path to the config file [default: ViewCounter.toml]
    #[arg(long, env = "VIEW_COUNTER_CONFIG", global(true))]
    pub config: Option<PathBuf>,
    /// Enable verbose logging.
    #[arg(short, long, global(true), action=ArgAction::Count)]
    pub verbose: u8,
    /// Be more quiet, conflicts with --verbose
    #[arg(short, long, global(true), conflicts_with("verbose"))]
    pub quiet: bool,
}

impl ViewCounter {
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn run(self) -> Result<()> {
        match self.action {
            ViewCounterSubcommands::Update(inner) => inner.run(self.config).await,
            ViewCounterSubcommands::Fetch(inner) => inner.run(self.config).await,
            ViewCounterSubcommands::Config(inner) => inner.run(self.config).await,
        }
    }
}

#[derive(Subcommand)]
enum ViewCounterSubcommands {
    /// Fetch the view count and render it into the page.
    Update(cmd::update::Update),
    /// Fetch the view count and print the text which would be rendered.
    Fetch(cmd::fetch::Fetch),
    /// Config controls.
    Config(cmd::config::Config),
}
