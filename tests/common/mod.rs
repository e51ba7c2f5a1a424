//! Common test infrastructure
//!
//! This module provides the infrastructure for end-to-end tests. Each test
//! gets an isolated server with its own temporary state directory.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestServer;
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_list_videos() {
//!     let server = TestServer::spawn().await;
//!
//!     let response = server.get("/v1/catalog/videos").await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

// Not every test binary exercises every helper.
#![allow(dead_code)]

mod server;

pub use server::TestServer;
