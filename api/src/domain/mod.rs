//! Domain layer
//!
//! Contains the stored-snapshot model and the ports it is persisted and fetched through.
//! - `entities`: Domain models
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
