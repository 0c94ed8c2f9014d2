//! Activity API adapter
//!
//! HTTP client for the social network's public activity API.

pub mod client;

pub use client::ActivityClientImpl;
