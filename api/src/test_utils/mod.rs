//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Mocks are hand-written rather than generated: the ports take `&str`
//! parameters and the mocks need to record calls and hold canned payloads.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
