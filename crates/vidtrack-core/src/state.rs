//! The persisted aggregate: scrape log plus per-video metrics history.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{MetricValue, RawVideo};

/// Everything the runner has recorded, loaded and saved as one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateState {
    /// Timestamp of the most recent successful ingestion.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    /// Always `video_history.len()` after an ingestion.
    #[serde(default, alias = "total_unique_entities")]
    pub total_unique_videos: usize,

    /// Append-only log of every scrape run, oldest first.
    #[serde(default)]
    pub all_scrapes: Vec<ScrapeBatch>,

    #[serde(default)]
    pub video_history: BTreeMap<String, TrackedVideo>,
}

impl AggregateState {
    #[must_use]
    pub fn latest_scrape(&self) -> Option<&ScrapeBatch> {
        self.all_scrapes.last()
    }
}

/// One ingestion run and the raw records it observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeBatch {
    /// `%Y%m%d_%H%M%S` label of `scraped_at`. Not unique.
    pub scrape_id: String,
    pub scraped_at: DateTime<Utc>,
    pub videos_found: usize,
    pub videos: Vec<RawVideo>,
}

/// A video's identity as first observed, plus every snapshot since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedVideo {
    pub first_seen: DateTime<Utc>,
    pub description: String,
    pub metrics_history: Vec<MetricsSnapshot>,
}

/// Engagement counters at one point in time. Unobserved counters are `null`,
/// never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub views: Option<MetricValue>,
    pub likes: Option<MetricValue>,
    pub comments: Option<MetricValue>,
    pub shares: Option<MetricValue>,
    pub bookmarks: Option<MetricValue>,
}

impl MetricsSnapshot {
    #[must_use]
    pub fn from_video(video: &RawVideo, timestamp: DateTime<Utc>) -> Self {
        let m = &video.metrics;
        Self {
            timestamp,
            views: m.views.clone(),
            likes: m.likes.clone(),
            comments: m.comments.clone(),
            shares: m.shares.clone(),
            bookmarks: m.bookmarks.clone(),
        }
    }
}
