//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::{Fetch, FetchId};
use crate::transcode::transcode_bytes;

/// Three-post activity feed: plain, article and photo-plus-video
pub fn sample_activities() -> Vec<u8> {
    include_bytes!("../../testdata/activities.json").to_vec()
}

/// A stored fetch of the sample feed, rendered at `fetched_at`
pub fn test_fetch_at(feed_id: &str, fetched_at: DateTime<Utc>) -> Fetch {
    let raw = sample_activities();
    let feed = transcode_bytes(&raw, fetched_at).expect("sample feed must transcode");

    Fetch {
        id: FetchId::new(),
        feed_id: feed_id.to_string(),
        fetched_at,
        raw,
        feed,
    }
}

/// A stored fetch of the sample feed at a fixed time
pub fn test_fetch(feed_id: &str) -> Fetch {
    test_fetch_at(feed_id, Utc.with_ymd_and_hms(2012, 3, 4, 5, 6, 7).unwrap())
}
