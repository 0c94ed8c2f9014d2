//! Fetch service
//!
//! Fetches activity feeds, transcodes them to Atom and stores both forms.
//! Also serves the read side: latest snapshot per feed and recent fetches.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{Fetch, FetchSummary, NewFetch};
use crate::domain::ports::{ActivityClient, FetchStore};
use crate::error::AppError;
use crate::transcode::transcode_bytes;

/// Service for fetching and storing feed snapshots
pub struct FetchService<S, C>
where
    S: FetchStore + ?Sized,
    C: ActivityClient + ?Sized,
{
    store: Arc<S>,
    client: Arc<C>,
}

impl<S, C> FetchService<S, C>
where
    S: FetchStore + ?Sized,
    C: ActivityClient + ?Sized,
{
    pub fn new(store: Arc<S>, client: Arc<C>) -> Self {
        Self { store, client }
    }

    /// Fetch one feed, transcode it and persist the raw and rendered payloads.
    ///
    /// The fetch time doubles as the Atom feed's `updated` value. Nothing is
    /// stored if the fetch or the transcode fails.
    pub async fn fetch_and_store(&self, feed_id: &str) -> Result<Fetch, AppError> {
        let raw = self.client.fetch_activities(feed_id).await?;
        let fetched_at = Utc::now();
        let feed = transcode_bytes(&raw, fetched_at)?;

        let new_fetch = NewFetch {
            feed_id: feed_id.to_string(),
            fetched_at,
            raw,
            feed,
        };
        let id = self.store.put(&new_fetch).await?;

        tracing::info!(
            feed_id,
            fetch_id = %id,
            raw_bytes = new_fetch.raw.len(),
            atom_bytes = new_fetch.feed.len(),
            "Stored fetch"
        );

        Ok(Fetch {
            id,
            feed_id: new_fetch.feed_id,
            fetched_at: new_fetch.fetched_at,
            raw: new_fetch.raw,
            feed: new_fetch.feed,
        })
    }

    /// Fetch and store every feed in `feed_ids`, in order.
    ///
    /// Stops at the first failure. Fetches stored before it are kept.
    pub async fn run_cycle(&self, feed_ids: &[String]) -> Result<Vec<Fetch>, AppError> {
        let mut fetches = Vec::with_capacity(feed_ids.len());

        for feed_id in feed_ids {
            match self.fetch_and_store(feed_id).await {
                Ok(fetch) => fetches.push(fetch),
                Err(e) => {
                    tracing::warn!(feed_id = %feed_id, "Fetch cycle aborted: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(fetches)
    }

    /// Latest stored snapshot for a feed
    pub async fn latest(&self, feed_id: &str) -> Result<Option<Fetch>, AppError> {
        Ok(self.store.latest(feed_id).await?)
    }

    /// Most recent fetches across all feeds, newest first
    pub async fn recent(&self, limit: u64) -> Result<Vec<FetchSummary>, AppError> {
        Ok(self.store.recent(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, TranscodeError};
    use crate::test_utils::{sample_activities, InMemoryFetchStore, MockActivityClient};
    use crate::transcode::AtomFeed;

    fn service(
        store: Arc<InMemoryFetchStore>,
        client: Arc<MockActivityClient>,
    ) -> FetchService<InMemoryFetchStore, MockActivityClient> {
        FetchService::new(store, client)
    }

    #[tokio::test]
    async fn fetch_and_store_persists_both_forms() {
        let store = Arc::new(InMemoryFetchStore::new());
        let client = Arc::new(MockActivityClient::new().with_feed("ann", sample_activities()));
        let svc = service(store.clone(), client);

        let fetch = svc.fetch_and_store("ann").await.unwrap();

        assert_eq!(fetch.feed_id, "ann");
        assert_eq!(fetch.raw, sample_activities());

        let stored = store.latest("ann").await.unwrap().unwrap();
        assert_eq!(stored, fetch);

        let atom: AtomFeed =
            quick_xml::de::from_str(std::str::from_utf8(&stored.feed).unwrap()).unwrap();
        assert_eq!(atom.entries.len(), 3);
        assert_eq!(
            atom.updated,
            fetch.fetched_at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
        );
    }

    #[tokio::test]
    async fn malformed_json_is_not_stored() {
        let store = Arc::new(InMemoryFetchStore::new());
        let client = Arc::new(MockActivityClient::new().with_feed("ann", b"{not json".to_vec()));
        let svc = service(store.clone(), client);

        let result = svc.fetch_and_store("ann").await;

        assert!(matches!(
            result,
            Err(AppError::Transcode(TranscodeError::Parse(_)))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_propagated() {
        let store = Arc::new(InMemoryFetchStore::new());
        let client = Arc::new(MockActivityClient::new());
        let svc = service(store.clone(), client);

        let result = svc.fetch_and_store("nobody").await;

        assert!(matches!(
            result,
            Err(AppError::Fetch(FetchError::Api { status: 404, .. }))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_propagated() {
        let store = Arc::new(InMemoryFetchStore::new().failing());
        let client = Arc::new(MockActivityClient::new().with_feed("ann", sample_activities()));
        let svc = service(store, client);

        let result = svc.fetch_and_store("ann").await;

        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[tokio::test]
    async fn run_cycle_fetches_configured_feeds_in_order() {
        let store = Arc::new(InMemoryFetchStore::new());
        let client = Arc::new(
            MockActivityClient::new()
                .with_feed("ann", sample_activities())
                .with_feed("bob", br#"{"title": "Bob", "items": []}"#.to_vec()),
        );
        let svc = service(store.clone(), client.clone());

        let feed_ids = vec!["ann".to_string(), "bob".to_string()];
        let fetches = svc.run_cycle(&feed_ids).await.unwrap();

        assert_eq!(
            fetches.iter().map(|f| f.feed_id.as_str()).collect::<Vec<_>>(),
            vec!["ann", "bob"]
        );
        assert_eq!(client.requested(), vec!["ann", "bob"]);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn run_cycle_stops_at_first_failure() {
        let store = Arc::new(InMemoryFetchStore::new());
        let client = Arc::new(
            MockActivityClient::new()
                .with_feed("ann", sample_activities())
                .with_feed("carl", sample_activities()),
        );
        let svc = service(store.clone(), client.clone());

        let feed_ids = vec!["ann".to_string(), "missing".to_string(), "carl".to_string()];
        let result = svc.run_cycle(&feed_ids).await;

        assert!(result.is_err());
        assert_eq!(client.requested(), vec!["ann", "missing"]);
        assert_eq!(store.len(), 1);
        assert!(store.latest("ann").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn run_cycle_with_no_feeds_does_nothing() {
        let store = Arc::new(InMemoryFetchStore::new());
        let client = Arc::new(MockActivityClient::new());
        let svc = service(store.clone(), client.clone());

        let fetches = svc.run_cycle(&[]).await.unwrap();

        assert!(fetches.is_empty());
        assert!(client.requested().is_empty());
    }

    #[tokio::test]
    async fn recent_lists_newest_first() {
        let store = Arc::new(InMemoryFetchStore::new());
        let client = Arc::new(
            MockActivityClient::new()
                .with_feed("ann", sample_activities())
                .with_feed("bob", sample_activities()),
        );
        let svc = service(store, client);

        svc.fetch_and_store("ann").await.unwrap();
        svc.fetch_and_store("bob").await.unwrap();

        let recent = svc.recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].feed_id, "bob");
        assert_eq!(recent[1].feed_id, "ann");

        let limited = svc.recent(1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let store: Arc<dyn FetchStore> = Arc::new(InMemoryFetchStore::new());
        let client: Arc<dyn ActivityClient> =
            Arc::new(MockActivityClient::new().with_feed("ann", sample_activities()));
        let svc: FetchService<dyn FetchStore, dyn ActivityClient> = FetchService::new(store, client);

        svc.fetch_and_store("ann").await.unwrap();

        assert!(svc.latest("ann").await.unwrap().is_some());
        assert!(svc.latest("bob").await.unwrap().is_none());
    }
}
