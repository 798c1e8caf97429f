//! Merging a freshly scraped batch into the aggregate state.

use chrono::{DateTime, Utc};
use vidtrack_core::{AggregateState, Clock, MetricsSnapshot, RawVideo, ScrapeBatch, TrackedVideo};
use vidtrack_store::StateStore;

use crate::error::IngestError;

/// Second-precision label used for `scrape_id`.
pub const SCRAPE_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Result of a saved ingestion: the new state and the batch that was appended.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub state: AggregateState,
    pub batch: ScrapeBatch,
}

/// Merges `videos` into `state` as one scrape taken at `at`.
///
/// Every record is stamped with `at` and kept in the batch. Records with a
/// resolvable id also get a snapshot appended to their history; the first
/// time an id is seen its `first_seen` and `description` are fixed.
/// Submitting the same batch twice records it twice.
///
/// Returns a copy of the batch appended to `state.all_scrapes`.
pub fn merge_batch(
    state: &mut AggregateState,
    videos: Vec<RawVideo>,
    at: DateTime<Utc>,
) -> ScrapeBatch {
    let scrape_id = at.format(SCRAPE_ID_FORMAT).to_string();
    let videos_found = videos.len();
    let mut stamped = Vec::with_capacity(videos_found);
    let mut untracked = 0usize;

    for mut video in videos {
        video.exact_scrape_time = Some(at);

        if let Some(id) = video.video_id() {
            let tracked = state
                .video_history
                .entry(id.into_owned())
                .or_insert_with(|| TrackedVideo {
                    first_seen: at,
                    description: video.description.clone().unwrap_or_default(),
                    metrics_history: Vec::new(),
                });
            tracked
                .metrics_history
                .push(MetricsSnapshot::from_video(&video, at));
        } else {
            untracked += 1;
        }

        stamped.push(video);
    }

    if untracked > 0 {
        tracing::debug!(
            scrape_id = %scrape_id,
            untracked,
            "records without an id kept in batch but not tracked"
        );
    }

    let batch = ScrapeBatch {
        scrape_id,
        scraped_at: at,
        videos_found,
        videos: stamped,
    };
    state.all_scrapes.push(batch.clone());
    state.last_updated = Some(at);
    state.total_unique_videos = state.video_history.len();

    batch
}

/// Merges `videos` into the working copy `state` and saves the result.
///
/// # Errors
///
/// Returns [`IngestError::Persist`] if the save fails. The merged state is
/// dropped in that case; nothing is retried.
pub fn ingest<S: StateStore>(
    store: &S,
    mut state: AggregateState,
    videos: Vec<RawVideo>,
    at: DateTime<Utc>,
) -> Result<Ingested, IngestError> {
    let batch = merge_batch(&mut state, videos, at);

    store
        .save(&state)
        .map_err(|source| IngestError::Persist {
            scrape_id: batch.scrape_id.clone(),
            source,
        })?;

    tracing::info!(
        scrape_id = %batch.scrape_id,
        videos_found = batch.videos_found,
        total_unique_videos = state.total_unique_videos,
        scrapes = state.all_scrapes.len(),
        "scrape ingested"
    );

    Ok(Ingested { state, batch })
}

/// One full load, merge, save cycle, timestamped by `clock`.
///
/// # Errors
///
/// Returns [`IngestError::Load`] if the stored state cannot be read, or
/// [`IngestError::Persist`] if the merged state cannot be saved.
pub fn load_and_ingest<S: StateStore, C: Clock + ?Sized>(
    store: &S,
    clock: &C,
    videos: Vec<RawVideo>,
) -> Result<Ingested, IngestError> {
    let state = store.load().map_err(IngestError::Load)?;
    ingest(store, state, videos, clock.now())
}
