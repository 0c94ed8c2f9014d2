//! Activity API port
//!
//! Retrieves a user's public activity feed as raw JSON.

use async_trait::async_trait;

use crate::error::FetchError;

#[async_trait]
pub trait ActivityClient: Send + Sync {
    /// Fetch the raw response body of the public activity list for `feed_id`
    async fn fetch_activities(&self, feed_id: &str) -> Result<Vec<u8>, FetchError>;
}
