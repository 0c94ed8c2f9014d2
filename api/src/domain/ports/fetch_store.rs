//! Fetch store port
//!
//! Persistence of raw and rendered feed snapshots.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Fetch, FetchId, FetchSummary, NewFetch};
use crate::error::DomainError;

/// Store for fetched feed snapshots
#[async_trait]
pub trait FetchStore: Send + Sync {
    /// Persist a new snapshot and return its id
    async fn put(&self, fetch: &NewFetch) -> Result<FetchId, DomainError>;

    /// Most recent snapshot for a feed, by fetch time
    async fn latest(&self, feed_id: &str) -> Result<Option<Fetch>, DomainError>;

    /// Up to `limit` snapshots across all feeds, newest first, without payloads
    async fn recent(&self, limit: u64) -> Result<Vec<FetchSummary>, DomainError>;
}
