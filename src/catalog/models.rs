//! Catalog data models.

use serde::{Deserialize, Serialize};

/// A single video in the catalog.
///
/// Identity is `id`, unique for the lifetime of the catalog. Records are
/// immutable once created; the catalog only ever prepends new ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Display label such as "3:24", not a parsed duration.
    pub duration_label: String,
    pub thumbnail_ref: String,
    pub source_ref: String,
}

/// One entry in the bounded watch-history log.
///
/// `video_id` is a soft reference: it may point at a record that no longer
/// exists in the catalog, and readers skip entries they cannot resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEntry {
    pub video_id: String,
    pub timestamp_millis: i64,
}
