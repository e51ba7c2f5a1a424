//! Video recommendation ranking.
//!
//! A priority-ordered fill over a catalog and watch-history snapshot: videos
//! sharing the current video's category come first, then videos from the
//! viewer's most-watched categories, then whatever is left in catalog order.
//! Pure function of its inputs, no storage access.

use crate::catalog::{VideoRecord, WatchEntry};
use std::collections::HashMap;

/// Number of recommendations callers get when they do not ask for a limit.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 6;

/// Produces an ordered, deduplicated list of videos relevant to `current_id`.
///
/// The result never contains `current_id` itself and holds at most `limit`
/// items. When `current_id` does not resolve to a catalog entry, the first
/// `limit` videos in catalog order are returned instead.
pub fn recommend_for_video(
    videos: &[VideoRecord],
    history: &[WatchEntry],
    current_id: &str,
    limit: usize,
) -> Vec<VideoRecord> {
    let current = match videos.iter().find(|v| v.id == current_id) {
        Some(current) => current,
        None => return videos.iter().take(limit).cloned().collect(),
    };

    let mut recs: Vec<&VideoRecord> = videos
        .iter()
        .filter(|v| v.id != current_id && v.category == current.category)
        .collect();

    // Fill from the most-watched categories next.
    for category in ranked_history_categories(videos, history) {
        if recs.len() >= limit {
            break;
        }
        let more: Vec<&VideoRecord> = videos
            .iter()
            .filter(|v| v.category == category && v.id != current_id)
            .filter(|v| !recs.iter().any(|r| r.id == v.id))
            .collect();
        recs.extend(more);
    }

    // Finally fill with whatever else the catalog holds.
    if recs.len() < limit {
        let more: Vec<&VideoRecord> = videos
            .iter()
            .filter(|v| v.id != current_id)
            .filter(|v| !recs.iter().any(|r| r.id == v.id))
            .collect();
        recs.extend(more);
    }

    recs.into_iter().take(limit).cloned().collect()
}

/// Categories appearing in the history, most frequent first.
///
/// Entries whose video id no longer resolves contribute nothing. Equal
/// frequencies keep the order in which a category was first seen in the log,
/// so the ranking is deterministic for a given snapshot.
fn ranked_history_categories(videos: &[VideoRecord], history: &[WatchEntry]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for entry in history {
        let video = match videos.iter().find(|v| v.id == entry.video_id) {
            Some(video) => video,
            None => continue, // dangling entry
        };
        let category = video.category.as_str();
        if !counts.contains_key(category) {
            first_seen.push(category);
        }
        *counts.entry(category).or_default() += 1;
    }

    // Stable sort: ties keep first-seen order.
    first_seen.sort_by_key(|category| std::cmp::Reverse(counts[category]));
    first_seen.into_iter().map(str::to_owned).collect()
}
