//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Fetch, FetchId, FetchSummary, NewFetch};
use crate::domain::ports::{ActivityClient, FetchStore};
use crate::error::{DomainError, FetchError};

// ============================================================================
// In-Memory Fetch Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryFetchStore {
    /// Insertion order
    fetches: Arc<RwLock<Vec<Fetch>>>,
    fail: bool,
}

impl InMemoryFetchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a fetch for testing
    pub fn with_fetch(self, fetch: Fetch) -> Self {
        self.fetches.write().unwrap().push(fetch);
        self
    }

    /// Make every operation fail with a database error
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn len(&self) -> usize {
        self.fetches.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::Database("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    /// Newest first; later inserts win ties
    fn sorted(&self) -> Vec<Fetch> {
        let mut fetches: Vec<Fetch> = self.fetches.read().unwrap().iter().rev().cloned().collect();
        fetches.sort_by(|a, b| b.fetched_at.cmp(&a.fetched_at));
        fetches
    }
}

#[async_trait]
impl FetchStore for InMemoryFetchStore {
    async fn put(&self, fetch: &NewFetch) -> Result<FetchId, DomainError> {
        self.check()?;

        let id = FetchId::new();
        self.fetches.write().unwrap().push(Fetch {
            id,
            feed_id: fetch.feed_id.clone(),
            fetched_at: fetch.fetched_at,
            raw: fetch.raw.clone(),
            feed: fetch.feed.clone(),
        });

        Ok(id)
    }

    async fn latest(&self, feed_id: &str) -> Result<Option<Fetch>, DomainError> {
        self.check()?;
        Ok(self.sorted().into_iter().find(|f| f.feed_id == feed_id))
    }

    async fn recent(&self, limit: u64) -> Result<Vec<FetchSummary>, DomainError> {
        self.check()?;
        Ok(self
            .sorted()
            .iter()
            .take(limit as usize)
            .map(Fetch::summary)
            .collect())
    }
}

// ============================================================================
// Mock Activity Client
// ============================================================================

/// Serves canned bodies per feed id; unknown ids get a 404 API error
#[derive(Default)]
pub struct MockActivityClient {
    feeds: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    requested: Arc<RwLock<Vec<String>>>,
}

impl MockActivityClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(self, feed_id: &str, body: Vec<u8>) -> Self {
        self.feeds
            .write()
            .unwrap()
            .insert(feed_id.to_string(), body);
        self
    }

    /// Feed ids requested so far, in call order
    pub fn requested(&self) -> Vec<String> {
        self.requested.read().unwrap().clone()
    }
}

#[async_trait]
impl ActivityClient for MockActivityClient {
    async fn fetch_activities(&self, feed_id: &str) -> Result<Vec<u8>, FetchError> {
        self.requested.write().unwrap().push(feed_id.to_string());

        self.feeds
            .read()
            .unwrap()
            .get(feed_id)
            .cloned()
            .ok_or_else(|| FetchError::Api {
                status: 404,
                message: format!("Not Found: {}", feed_id),
            })
    }
}
