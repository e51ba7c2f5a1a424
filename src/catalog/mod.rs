mod models;
mod seed;
mod store;

pub use models::{VideoRecord, WatchEntry};
pub use seed::sample_videos;
pub use store::{CatalogStore, WATCH_HISTORY_CAP};
