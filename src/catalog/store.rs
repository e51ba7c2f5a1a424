//! Storage-backed catalog store.
//!
//! Owns the authoritative video list, the bounded watch-history log and the
//! like set. Every read decodes the current storage snapshot; decode failures
//! fail closed to the documented defaults instead of surfacing parse errors.

use super::models::{VideoRecord, WatchEntry};
use super::seed::sample_videos;
use crate::storage::{Storage, StorageKey};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Maximum number of retained watch-history entries. Oldest entries are
/// evicted first once the log grows past this.
pub const WATCH_HISTORY_CAP: usize = 50;

pub struct CatalogStore {
    storage: Arc<dyn Storage>,
}

impl CatalogStore {
    /// Opens the catalog over the given storage, seeding the sample set if
    /// the videos key is absent or unreadable.
    pub fn open(storage: Arc<dyn Storage>) -> Result<CatalogStore> {
        let store = CatalogStore { storage };
        store.load_videos()?;
        Ok(store)
    }

    // =========================================================================
    // Videos
    // =========================================================================

    /// Returns all known records, insertion order preserved (most recently
    /// uploaded first, since uploads prepend).
    pub fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        self.load_videos()
    }

    /// Looks up a video by id. Returns Ok(None) when the id is unknown;
    /// that is a normal outcome, not an error.
    pub fn find_video(&self, id: &str) -> Result<Option<VideoRecord>> {
        Ok(self.load_videos()?.into_iter().find(|v| v.id == id))
    }

    /// Prepends a new record. The caller guarantees id uniqueness.
    pub fn add_video(&self, record: VideoRecord) -> Result<()> {
        let mut videos = self.load_videos()?;
        videos.insert(0, record);
        self.save_videos(&videos)
    }

    /// Distinct categories across the catalog, sorted alphabetically.
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for video in self.load_videos()? {
            if !categories.contains(&video.category) {
                categories.push(video.category);
            }
        }
        categories.sort();
        Ok(categories)
    }

    /// All videos in the given category, catalog order.
    pub fn videos_in_category(&self, category: &str) -> Result<Vec<VideoRecord>> {
        Ok(self
            .load_videos()?
            .into_iter()
            .filter(|v| v.category == category)
            .collect())
    }

    /// Case-insensitive substring search over title, category and
    /// description.
    pub fn search(&self, query: &str) -> Result<Vec<VideoRecord>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .load_videos()?
            .into_iter()
            .filter(|v| {
                v.title.to_lowercase().contains(&needle)
                    || v.category.to_lowercase().contains(&needle)
                    || v.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    // =========================================================================
    // Watch history
    // =========================================================================

    /// Appends a watch entry for the id with the current time, evicting the
    /// oldest entries until the log is back within the cap.
    pub fn record_watch(&self, id: &str) -> Result<()> {
        let mut history = self.watch_history()?;
        history.push(WatchEntry {
            video_id: id.to_owned(),
            timestamp_millis: Utc::now().timestamp_millis(),
        });
        while history.len() > WATCH_HISTORY_CAP {
            history.remove(0);
        }
        self.save_history(&history)
    }

    /// The current watch-history log, oldest entry first.
    pub fn watch_history(&self) -> Result<Vec<WatchEntry>> {
        match self.storage.get(StorageKey::WatchHistory)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(history) => Ok(history),
                Err(err) => {
                    warn!("Discarding malformed watch history state: {}", err);
                    Ok(Vec::new())
                }
            },
            None => Ok(Vec::new()),
        }
    }

    // =========================================================================
    // Likes
    // =========================================================================

    /// Flips membership of the id in the like set. Returns the new state.
    pub fn toggle_like(&self, id: &str) -> Result<bool> {
        let mut likes = self.liked_videos()?;
        let liked = if likes.iter().any(|v| v == id) {
            likes.retain(|v| v != id);
            false
        } else {
            likes.push(id.to_owned());
            true
        };
        self.save_likes(&likes)?;
        Ok(liked)
    }

    pub fn is_liked(&self, id: &str) -> Result<bool> {
        Ok(self.liked_videos()?.iter().any(|v| v == id))
    }

    /// The liked video ids. Order is not meaningful.
    pub fn liked_videos(&self) -> Result<Vec<String>> {
        let raw = match self.storage.get(StorageKey::Likes)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };
        let parsed: Vec<String> = match serde_json::from_str(&raw) {
            Ok(likes) => likes,
            Err(err) => {
                warn!("Discarding malformed likes state: {}", err);
                return Ok(Vec::new());
            }
        };
        // Set semantics: drop duplicates a foreign writer may have left behind.
        let mut likes: Vec<String> = Vec::with_capacity(parsed.len());
        for id in parsed {
            if !likes.contains(&id) {
                likes.push(id);
            }
        }
        Ok(likes)
    }

    // =========================================================================
    // Persistence helpers
    // =========================================================================

    fn load_videos(&self) -> Result<Vec<VideoRecord>> {
        match self.storage.get(StorageKey::Videos)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(videos) => Ok(videos),
                Err(err) => {
                    warn!("Discarding malformed videos state, reseeding samples: {}", err);
                    let videos = sample_videos();
                    self.save_videos(&videos)?;
                    Ok(videos)
                }
            },
            None => {
                let videos = sample_videos();
                self.save_videos(&videos)?;
                Ok(videos)
            }
        }
    }

    fn save_videos(&self, videos: &[VideoRecord]) -> Result<()> {
        self.storage
            .set(StorageKey::Videos, &serde_json::to_string(videos)?)
    }

    fn save_history(&self, history: &[WatchEntry]) -> Result<()> {
        self.storage
            .set(StorageKey::WatchHistory, &serde_json::to_string(history)?)
    }

    fn save_likes(&self, likes: &[String]) -> Result<()> {
        self.storage
            .set(StorageKey::Likes, &serde_json::to_string(likes)?)
    }
}
