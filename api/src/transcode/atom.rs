//! Atom 1.0 output model
//!
//! Field order matches element order in the serialized document.

use serde::{Deserialize, Serialize};

pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Prefix for entry ids, followed by the original post id
pub const ENTRY_ID_PREFIX: &str = "tag:google.com,1970:";

/// Format of the feed-level `updated` element
pub const UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "feed")]
pub struct AtomFeed {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub updated: String,
    #[serde(rename = "entry", default)]
    pub entries: Vec<AtomEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub id: String,
    pub author: AtomAuthor,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub published: String,
    pub summary: AtomText,
    pub link: AtomLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomAuthor {
    #[serde(default)]
    pub name: String,
}

/// Text construct, e.g. `<summary type="html">...</summary>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomText {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "$text", default)]
    pub text: String,
}

impl AtomText {
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            kind: "html".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomLink {
    #[serde(rename = "@href", default)]
    pub href: String,
}
