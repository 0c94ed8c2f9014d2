//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod activity;
pub mod postgres;

pub use activity::ActivityClientImpl;
pub use postgres::PostgresFetchStore;
