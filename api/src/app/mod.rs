//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between the transcoder, ports, and external systems.

pub mod fetch_service;
pub mod refresh_scheduler;

pub use fetch_service::FetchService;
pub use refresh_scheduler::RefreshScheduler;
