//! Built-in sample catalog, written to storage on first run.

use super::models::VideoRecord;

/// The fixed sample set the catalog is seeded with when the videos key is
/// absent or unreadable.
pub fn sample_videos() -> Vec<VideoRecord> {
    vec![
        VideoRecord {
            id: "v1".to_owned(),
            title: "Amazing Nature — Relaxing 4K".to_owned(),
            description: "Beautiful nature footage for relaxation.".to_owned(),
            category: "Entertainment".to_owned(),
            duration_label: "3:24".to_owned(),
            thumbnail_ref: "assets/thumb1.svg".to_owned(),
            source_ref:
                "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4"
                    .to_owned(),
        },
        VideoRecord {
            id: "v2".to_owned(),
            title: "JavaScript Basics — Quick Guide".to_owned(),
            description: "Introduction to JS fundamentals.".to_owned(),
            category: "Education".to_owned(),
            duration_label: "7:56".to_owned(),
            thumbnail_ref: "assets/thumb2.svg".to_owned(),
            source_ref:
                "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4"
                    .to_owned(),
        },
        VideoRecord {
            id: "v3".to_owned(),
            title: "Epic Music Mix".to_owned(),
            description: "A short epic soundtrack mix.".to_owned(),
            category: "Music".to_owned(),
            duration_label: "4:50".to_owned(),
            thumbnail_ref: "assets/thumb3.svg".to_owned(),
            source_ref:
                "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4"
                    .to_owned(),
        },
    ]
}
