//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod activity_client;
pub mod fetch_store;

pub use activity_client::ActivityClient;
pub use fetch_store::FetchStore;
