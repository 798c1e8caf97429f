//! Raw scraped records as they arrive from the scraper.
//!
//! A record is deliberately loose: every field is optional, metric values are
//! kept exactly as observed (`"12.3K"`, `4500`, ...), and any key the runner
//! does not recognise is carried through in [`RawVideo::extra`].
//!
//! Records go through a plain JSON object on both sides so that a stored item
//! keeps every key it arrived with. A recognised key whose value does not fit
//! its typed slot (an explicit `null`, a non-string `description`) lands in
//! `extra` unchanged instead of failing the batch.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

const ID: &str = "id";
const DESCRIPTION: &str = "description";
const EXACT_SCRAPE_TIME: &str = "exact_scrape_time";
const VIEWS: &str = "views";
const LIKES: &str = "likes";
const COMMENTS: &str = "comments";
const SHARES: &str = "shares";
const BOOKMARKS: &str = "bookmarks";

/// One scraped video as reported by the scraper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct RawVideo {
    /// The id exactly as reported, of whatever JSON type. See
    /// [`RawVideo::video_id`] for the key used in history.
    pub id: Option<Value>,

    pub description: Option<String>,

    pub metrics: MetricFields,

    /// Set by ingestion to the batch timestamp. Whatever the scraper reported
    /// here is ignored, and values that are not RFC 3339 are dropped on read.
    pub exact_scrape_time: Option<DateTime<Utc>>,

    /// Unrecognised keys, plus recognised keys with unusable values, passed
    /// through unchanged.
    pub extra: Map<String, Value>,
}

impl RawVideo {
    /// The identifier used to key history, or `None` when the id is absent
    /// or falsy (`null`, `false`, `0`, `""`, empty collections).
    ///
    /// Numbers are keyed by their decimal form. Non-empty arrays, objects and
    /// `true` cannot name a video and are also `None`.
    #[must_use]
    pub fn video_id(&self) -> Option<Cow<'_, str>> {
        match self.id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) if !is_zero(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawVideo {
    fn from(object: Map<String, Value>) -> Self {
        let mut video = RawVideo::default();
        for (key, value) in object {
            match key.as_str() {
                ID => video.id = Some(value),
                EXACT_SCRAPE_TIME => video.exact_scrape_time = lenient_time(&value),
                DESCRIPTION if value.is_string() => {
                    video.description = value.as_str().map(str::to_owned);
                }
                name => match video.metrics.slot_mut(name) {
                    Some(slot) if !value.is_null() => *slot = Some(MetricValue::from(value)),
                    _ => {
                        video.extra.insert(key, value);
                    }
                },
            }
        }
        video
    }
}

impl From<RawVideo> for Map<String, Value> {
    fn from(video: RawVideo) -> Self {
        let mut object = Map::new();
        if let Some(id) = video.id {
            object.insert(ID.to_owned(), id);
        }
        if let Some(description) = video.description {
            object.insert(DESCRIPTION.to_owned(), Value::String(description));
        }
        let MetricFields {
            views,
            likes,
            comments,
            shares,
            bookmarks,
        } = video.metrics;
        for (name, value) in [
            (VIEWS, views),
            (LIKES, likes),
            (COMMENTS, comments),
            (SHARES, shares),
            (BOOKMARKS, bookmarks),
        ] {
            if let Some(value) = value {
                object.insert(name.to_owned(), value.into());
            }
        }
        if let Some(at) = video.exact_scrape_time {
            object.insert(
                EXACT_SCRAPE_TIME.to_owned(),
                Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            );
        }
        // Keys above never appear in `extra` too, so nothing is overwritten.
        object.extend(video.extra);
        object
    }
}

/// Engagement counters carried by a raw record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFields {
    pub views: Option<MetricValue>,
    pub likes: Option<MetricValue>,
    pub comments: Option<MetricValue>,
    pub shares: Option<MetricValue>,
    pub bookmarks: Option<MetricValue>,
}

impl MetricFields {
    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<MetricValue>> {
        match name {
            VIEWS => Some(&mut self.views),
            LIKES => Some(&mut self.likes),
            COMMENTS => Some(&mut self.comments),
            SHARES => Some(&mut self.shares),
            BOOKMARKS => Some(&mut self.bookmarks),
            _ => None,
        }
    }
}

/// A metric exactly as the scraper reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(Number),
    Text(String),
    Other(Value),
}

impl MetricValue {
    /// True for values that carry no reading: `""`, `0`, `false`, empty
    /// collections.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            MetricValue::Text(s) => s.is_empty(),
            MetricValue::Number(n) => is_zero(n),
            MetricValue::Other(v) => match v {
                Value::Null | Value::Bool(false) => true,
                Value::String(s) => s.is_empty(),
                Value::Array(a) => a.is_empty(),
                Value::Object(o) => o.is_empty(),
                Value::Bool(true) => false,
                Value::Number(n) => is_zero(n),
            },
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
            MetricValue::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<Value> for MetricValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => MetricValue::Number(n),
            Value::String(s) => MetricValue::Text(s),
            other => MetricValue::Other(other),
        }
    }
}

impl From<MetricValue> for Value {
    fn from(value: MetricValue) -> Self {
        match value {
            MetricValue::Number(n) => Value::Number(n),
            MetricValue::Text(s) => Value::String(s),
            MetricValue::Other(v) => v,
        }
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_owned())
    }
}

impl From<u64> for MetricValue {
    fn from(n: u64) -> Self {
        MetricValue::Number(n.into())
    }
}

#[allow(clippy::float_cmp)]
fn is_zero(n: &Number) -> bool {
    if let Some(i) = n.as_u64() {
        return i == 0;
    }
    if let Some(i) = n.as_i64() {
        return i == 0;
    }
    n.as_f64().is_some_and(|f| f == 0.0)
}

fn lenient_time(value: &Value) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.as_str()?)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
