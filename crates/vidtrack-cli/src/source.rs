//! Where a run's scraped records come from.
//!
//! Scraping itself happens outside this program. A run either reads a JSON
//! array of records from a file or stdin, or executes the configured scrape
//! command and reads the array from its stdout.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::io::AsyncReadExt;
use vidtrack_core::{AppConfig, RawVideo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum VideoSource {
    File(PathBuf),
    Stdin,
    Command(String),
}

impl VideoSource {
    /// Pick the source for a run: an explicit `--input` wins, otherwise the
    /// configured scrape command.
    pub(crate) fn resolve(input: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<Self> {
        match input {
            Some(path) if path == Path::new("-") => Ok(Self::Stdin),
            Some(path) => Ok(Self::File(path)),
            None => config
                .scrape_command
                .clone()
                .map(Self::Command)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "no input given and VIDTRACK_SCRAPE_COMMAND is not set; pass --input <file>"
                    )
                }),
        }
    }

    pub(crate) async fn fetch(&self) -> anyhow::Result<Vec<RawVideo>> {
        match self {
            Self::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                parse_videos(&bytes, &path.display().to_string())
            }
            Self::Stdin => {
                let mut bytes = Vec::new();
                tokio::io::stdin()
                    .read_to_end(&mut bytes)
                    .await
                    .context("reading stdin")?;
                parse_videos(&bytes, "stdin")
            }
            Self::Command(cmd) => run_scrape_command(cmd).await,
        }
    }
}

/// Run `cmd` through `sh -c` and parse its stdout.
async fn run_scrape_command(cmd: &str) -> anyhow::Result<Vec<RawVideo>> {
    tracing::info!(command = cmd, "running scrape command");
    let output = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .kill_on_drop(true)
        .output()
        .await
        .with_context(|| format!("spawning scrape command `{cmd}`"))?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        tracing::debug!(command = cmd, "scraper: {line}");
    }

    if !output.status.success() {
        anyhow::bail!(
            "scrape command `{cmd}` exited with {}: {}",
            output.status,
            stderr.trim()
        );
    }

    parse_videos(&output.stdout, "scrape command output")
}

/// Decode a JSON array of scraped records.
pub(crate) fn parse_videos(bytes: &[u8], origin: &str) -> anyhow::Result<Vec<RawVideo>> {
    serde_json::from_slice(bytes)
        .with_context(|| format!("{origin} is not a JSON array of scraped records"))
}
