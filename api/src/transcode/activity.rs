//! Activity feed input model
//!
//! Mirrors the subset of the activity API's JSON schema that the transcoder
//! consumes. Decoding is permissive: unknown fields are skipped, and missing
//! or `null` fields fall back to their zero value.

use serde::{Deserialize, Deserializer};

/// A user's public activity stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActivityFeed {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<ActivityItem>,
}

/// A single post
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActivityItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub actor: Actor,
    /// Opaque timestamp, never reparsed
    #[serde(deserialize_with = "null_as_default")]
    pub updated: String,
    /// Opaque timestamp, never reparsed
    #[serde(deserialize_with = "null_as_default")]
    pub published: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object: ActivityObject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Actor {
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// Body of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActivityObject {
    /// Already HTML
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
}

/// Media or link embedded in a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    /// "article", "photo", or anything else
    #[serde(deserialize_with = "null_as_default")]
    pub object_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
