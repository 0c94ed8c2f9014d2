//! SeaORM entities
//!
//! Table models for the PostgreSQL adapters. Domain code uses the types in
//! `domain::entities` instead.

pub mod fetches;
