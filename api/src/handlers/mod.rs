//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod feed;

pub use feed::{front_page, get_feed, get_preview, get_raw, run_cron};
