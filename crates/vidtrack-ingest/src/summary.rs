//! Human-readable recap of a scrape batch.

use vidtrack_core::{MetricValue, RawVideo, ScrapeBatch};

use crate::metric::rank_value;

const DESCRIPTION_PREVIEW_CHARS: usize = 40;

/// The `n` videos in `batch` with the highest view counts.
///
/// Videos with no (or a blank) view count are left out. Equal counts keep
/// their order in the batch.
#[must_use]
pub fn top_by_views(batch: &ScrapeBatch, n: usize) -> Vec<&RawVideo> {
    let mut ranked: Vec<(&RawVideo, u64)> = batch
        .videos
        .iter()
        .filter_map(|video| {
            video
                .metrics
                .views
                .as_ref()
                .filter(|views| !views.is_blank())
                .map(|views| (video, rank_value(views)))
        })
        .collect();

    // `sort_by` is stable, so ties stay in batch order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(video, _)| video).collect()
}

/// Summary lines for console output. Empty when no video has a view count.
#[must_use]
pub fn summary_lines(batch: &ScrapeBatch, n: usize) -> Vec<String> {
    let top = top_by_views(batch, n);
    if top.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["Top videos by views:".to_string()];
    for video in top {
        let preview: String = video
            .description
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(DESCRIPTION_PREVIEW_CHARS)
            .collect();
        lines.push(format!("  - {preview}..."));
        lines.push(format!(
            "    Views: {}, Likes: {}",
            display(video.metrics.views.as_ref()),
            display(video.metrics.likes.as_ref())
        ));
    }
    lines
}

fn display(value: Option<&MetricValue>) -> String {
    value.map_or_else(|| "n/a".to_string(), ToString::to_string)
}
