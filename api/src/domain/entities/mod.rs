//! Domain entities
//!
//! Pure domain models representing stored feed snapshots.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod fetch;

pub use fetch::{Fetch, FetchId, FetchSummary, NewFetch};
