//! One ingestion run: fetch records, then load, merge and save.

use anyhow::Context;
use vidtrack_core::{AppConfig, SystemClock};
use vidtrack_ingest::{load_and_ingest, summary_lines, Ingested};
use vidtrack_store::JsonFileStore;

use crate::source::VideoSource;

/// Fetch records from `source`, ingest them into the configured state file
/// and print the batch summary.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the state cannot be
/// loaded or saved.
pub(crate) async fn run_ingest(config: &AppConfig, source: &VideoSource) -> anyhow::Result<()> {
    let videos = source.fetch().await?;
    tracing::info!(count = videos.len(), "fetched scraped records");

    let store = JsonFileStore::new(config.data_path.clone());
    let ingested = tokio::task::spawn_blocking(move || load_and_ingest(&store, &SystemClock, videos))
        .await
        .context("ingestion task panicked")??;

    print_run_summary(&ingested, config.summary_top_n);
    Ok(())
}

fn print_run_summary(ingested: &Ingested, top_n: usize) {
    let batch = &ingested.batch;
    println!(
        "scrape {}: {} videos recorded, {} unique videos tracked",
        batch.scrape_id, batch.videos_found, ingested.state.total_unique_videos
    );
    for line in summary_lines(batch, top_n) {
        println!("{line}");
    }
}
