//! Fetch domain entity
//!
//! A snapshot of one feed: the raw activity JSON as returned by the API and
//! the Atom document rendered from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stored fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchId(pub Uuid);

impl FetchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FetchId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for FetchId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FetchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored fetch, payloads included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetch {
    pub id: FetchId,
    pub feed_id: String,
    pub fetched_at: DateTime<Utc>,
    /// Activity JSON exactly as received
    pub raw: Vec<u8>,
    /// Rendered Atom XML
    pub feed: Vec<u8>,
}

impl Fetch {
    pub fn summary(&self) -> FetchSummary {
        FetchSummary {
            id: self.id,
            feed_id: self.feed_id.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

/// Data for persisting a new fetch
#[derive(Debug, Clone)]
pub struct NewFetch {
    pub feed_id: String,
    pub fetched_at: DateTime<Utc>,
    pub raw: Vec<u8>,
    pub feed: Vec<u8>,
}

/// A stored fetch without its payloads, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
    pub id: FetchId,
    pub feed_id: String,
    pub fetched_at: DateTime<Utc>,
}
