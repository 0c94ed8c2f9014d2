//! Transcoder
//!
//! Converts one activity feed JSON document into one Atom XML document.

pub mod activity;
pub mod atom;
pub mod renderer;

use std::borrow::Cow;
use std::io::{Read, Write};

use chrono::{DateTime, Utc};

pub use activity::{ActivityFeed, ActivityItem};
pub use atom::AtomFeed;
pub use renderer::{render_post, render_preview_page};

use crate::error::TranscodeError;
use atom::{
    AtomAuthor, AtomEntry, AtomLink, AtomText, ATOM_NAMESPACE, ENTRY_ID_PREFIX, UPDATED_FORMAT,
};

/// Decode an activity feed from a JSON byte stream
///
/// A top-level `null` decodes to an empty feed.
pub fn read_activity_feed<R: Read>(reader: R) -> Result<ActivityFeed, TranscodeError> {
    let feed: Option<ActivityFeed> = serde_json::from_reader(reader)?;
    Ok(feed.unwrap_or_default())
}

/// Map an activity feed to an Atom feed, one entry per item in order
pub fn build_atom_feed(feed: &ActivityFeed, now: DateTime<Utc>) -> AtomFeed {
    AtomFeed {
        xmlns: ATOM_NAMESPACE.to_string(),
        id: feed.id.clone(),
        title: feed.title.clone(),
        updated: now.format(UPDATED_FORMAT).to_string(),
        entries: feed.items.iter().map(build_entry).collect(),
    }
}

fn build_entry(item: &ActivityItem) -> AtomEntry {
    AtomEntry {
        title: item.title.clone(),
        id: format!("{}{}", ENTRY_ID_PREFIX, item.id),
        author: AtomAuthor {
            name: item.actor.display_name.clone(),
        },
        updated: item.updated.clone(),
        published: item.published.clone(),
        summary: AtomText::html(render_post(item)),
        link: AtomLink {
            href: item.object.url.clone(),
        },
    }
}

/// Encode an Atom feed as XML and write it out
pub fn write_atom_feed<W: Write>(feed: &AtomFeed, mut writer: W) -> Result<(), TranscodeError> {
    let xml = quick_xml::se::to_string(feed).map_err(|e| TranscodeError::Write(e.to_string()))?;
    writer.write_all(xml_safe(&xml).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Post-process serialized XML so any XML 1.0 reader accepts it.
///
/// The serializer emits no whitespace of its own, so every carriage return
/// or control character here comes from a text or attribute value. Carriage
/// returns become `&#xD;` to survive end-of-line normalization; characters
/// outside the XML `Char` production become U+FFFD.
fn xml_safe(xml: &str) -> Cow<'_, str> {
    if !xml.chars().any(|c| c == '\r' || !is_xml_char(c)) {
        return Cow::Borrowed(xml);
    }

    let mut out = String::with_capacity(xml.len() + 8);
    for c in xml.chars() {
        match c {
            '\r' => out.push_str("&#xD;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push(char::REPLACEMENT_CHARACTER),
        }
    }
    Cow::Owned(out)
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Transcode with the feed-level `updated` set to the given instant
///
/// Callers pass the clock explicitly; the fetch service uses the fetch time.
pub fn transcode_at<R: Read, W: Write>(
    reader: R,
    writer: W,
    now: DateTime<Utc>,
) -> Result<(), TranscodeError> {
    let feed = read_activity_feed(reader)?;
    write_atom_feed(&build_atom_feed(&feed, now), writer)
}

/// In-memory variant of [`transcode_at`]
pub fn transcode_bytes(raw: &[u8], now: DateTime<Utc>) -> Result<Vec<u8>, TranscodeError> {
    let mut out = Vec::new();
    transcode_at(raw, &mut out, now)?;
    Ok(out)
}
