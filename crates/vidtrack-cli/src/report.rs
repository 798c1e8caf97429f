//! `report` subcommand: a recap of what has been recorded so far.

use vidtrack_core::{AggregateState, AppConfig};
use vidtrack_ingest::summary_lines;
use vidtrack_store::{JsonFileStore, StateStore};

/// Load the state file and print the recap.
///
/// # Errors
///
/// Returns an error if the state file exists but cannot be read or decoded.
pub(crate) fn run_report(config: &AppConfig, top_n: usize) -> anyhow::Result<()> {
    let store = JsonFileStore::new(config.data_path.clone());
    let state = store.load()?;
    println!("state file: {}", store.path().display());
    for line in report_lines(&state, top_n) {
        println!("{line}");
    }
    Ok(())
}

fn report_lines(state: &AggregateState, top_n: usize) -> Vec<String> {
    let Some(last_updated) = state.last_updated else {
        return vec!["nothing recorded yet".to_string()];
    };

    let snapshots: usize = state
        .video_history
        .values()
        .map(|v| v.metrics_history.len())
        .sum();

    let mut lines = vec![
        format!("last updated: {}", last_updated.to_rfc3339()),
        format!("scrapes recorded: {}", state.all_scrapes.len()),
        format!("unique videos: {}", state.total_unique_videos),
        format!("metric snapshots: {snapshots}"),
    ];

    if let Some(latest) = state.latest_scrape() {
        lines.push(format!(
            "latest scrape {}: {} videos",
            latest.scrape_id, latest.videos_found
        ));
        lines.extend(summary_lines(latest, top_n));
    }
    lines
}
