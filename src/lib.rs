//! Streamly Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod config;
pub mod recommend;
pub mod server;
pub mod storage;
pub mod user;

// Re-export commonly used types for convenience
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageKey};
