mod report;
mod run;
mod scheduler;
mod source;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::source::VideoSource;

#[derive(Debug, Parser)]
#[command(name = "vidtrack")]
#[command(about = "Record scraped video metrics into a running history")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ingest one scrape (default when no command is given)
    Ingest {
        /// JSON array of scraped records; `-` reads stdin. Defaults to
        /// running VIDTRACK_SCRAPE_COMMAND.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Run the scrape command on the configured cron schedule until ctrl-c
    Schedule,
    /// Print a recap of the stored history
    Report {
        /// How many videos to list from the latest scrape
        #[arg(long)]
        top: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Loads `.env` before reading the environment.
    let config = Arc::new(vidtrack_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command.unwrap_or(Commands::Ingest { input: None }) {
        Commands::Ingest { input } => {
            let source = VideoSource::resolve(input, &config)?;
            run::run_ingest(&config, &source).await?;
        }
        Commands::Schedule => scheduler::run_scheduled(config).await?,
        Commands::Report { top } => {
            report::run_report(&config, top.unwrap_or(config.summary_top_n))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
