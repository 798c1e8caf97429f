//! Round-trip tests for `JsonFileStore` against a real temporary directory.

use std::collections::BTreeMap;
use std::fs;

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde_json::json;

use vidtrack_core::{AggregateState, MetricsSnapshot, RawVideo, ScrapeBatch, TrackedVideo};
use vidtrack_store::{JsonFileStore, StateStore, StoreError};

fn at(hour: u32, nanos: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0)
        .unwrap()
        .with_nanosecond(nanos)
        .unwrap()
}

/// A state with one batch, one tracked video and one id-less item.
fn sample_state() -> AggregateState {
    let t = at(8, 123_456_789);
    let mut tracked: RawVideo = serde_json::from_value(json!({
        "id": "7350",
        "description": "Rose Garden remarks 🌹",
        "views": "1.2M",
        "likes": 48_100,
        "url": "https://example.com/v/7350"
    }))
    .unwrap();
    tracked.exact_scrape_time = Some(t);
    let mut anonymous: RawVideo =
        serde_json::from_value(json!({ "description": "no id item" })).unwrap();
    anonymous.exact_scrape_time = Some(t);

    let mut history = BTreeMap::new();
    history.insert(
        "7350".to_string(),
        TrackedVideo {
            first_seen: t,
            description: "Rose Garden remarks 🌹".to_string(),
            metrics_history: vec![MetricsSnapshot::from_video(&tracked, t)],
        },
    );

    AggregateState {
        last_updated: Some(t),
        total_unique_videos: 1,
        all_scrapes: vec![ScrapeBatch {
            scrape_id: "20250602_080000".to_string(),
            scraped_at: t,
            videos_found: 2,
            videos: vec![tracked, anonymous],
        }],
        video_history: history,
    }
}

#[test]
fn missing_file_loads_as_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("absent.json"));
    let state = store.load().unwrap();
    assert_eq!(state, AggregateState::default());
    assert!(state.last_updated.is_none());
    assert_eq!(state.total_unique_videos, 0);
}

#[test]
fn save_then_load_round_trips_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    let original = sample_state();

    store.save(&original).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, original);
    assert_eq!(
        loaded.video_history["7350"].first_seen.timestamp_subsec_nanos(),
        123_456_789
    );
}

#[test]
fn save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output").join("nested").join("state.json");
    let store = JsonFileStore::new(&path);

    store.save(&sample_state()).unwrap();

    assert!(path.is_file());
}

#[test]
fn save_overwrites_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    store.save(&sample_state()).unwrap();

    store.save(&AggregateState::default()).unwrap();

    assert_eq!(store.load().unwrap(), AggregateState::default());
}

#[test]
fn persisted_document_uses_documented_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    JsonFileStore::new(&path).save(&sample_state()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(doc["total_unique_videos"], json!(1));
    assert_eq!(doc["all_scrapes"][0]["scrape_id"], json!("20250602_080000"));
    assert_eq!(doc["all_scrapes"][0]["videos_found"], json!(2));
    assert_eq!(
        doc["all_scrapes"][0]["videos"][0]["url"],
        json!("https://example.com/v/7350")
    );
    assert_eq!(
        doc["all_scrapes"][0]["videos"][1]["exact_scrape_time"],
        json!("2025-06-02T08:00:00.123456789Z")
    );
    assert_eq!(
        doc["video_history"]["7350"]["metrics_history"][0]["comments"],
        serde_json::Value::Null
    );
    // Non-ASCII text is written as-is, not escaped.
    assert!(text.contains("🌹"));
}

#[test]
fn empty_file_loads_as_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "  \n").unwrap();

    let state = JsonFileStore::new(&path).load().unwrap();

    assert_eq!(state, AggregateState::default());
}

#[test]
fn malformed_file_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, "{ not json").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();

    assert!(
        matches!(err, StoreError::Decode { ref path, .. } if path.ends_with("state.json")),
        "expected Decode error, got: {err:?}"
    );
}

#[test]
fn stored_items_keep_explicit_nulls_and_odd_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let item = json!({
        "id": false,
        "description": null,
        "views": "3K",
        "likes": null,
        "author": null
    });
    let mut state = AggregateState::default();
    state.all_scrapes.push(ScrapeBatch {
        scrape_id: "20250602_080000".to_string(),
        scraped_at: at(8, 0),
        videos_found: 1,
        videos: vec![serde_json::from_value(item.clone()).unwrap()],
    });

    let store = JsonFileStore::new(&path);
    store.save(&state).unwrap();
    store.save(&store.load().unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["all_scrapes"][0]["videos"][0], item);
}

#[test]
fn legacy_counter_name_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    fs::write(&path, r#"{"last_updated":null,"total_unique_entities":4}"#).unwrap();

    let state = JsonFileStore::new(&path).load().unwrap();

    assert_eq!(state.total_unique_videos, 4);
}
