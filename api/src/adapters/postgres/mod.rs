//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod fetch_repo;


pub use fetch_repo::PostgresFetchStore;
