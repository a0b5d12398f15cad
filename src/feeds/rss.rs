// src/feeds/rss.rs
// RSS 2.0 parsing for the feed watcher. Parsing is pure (string in, entries
// out) so the recency filter and item mapping can be tested without I/O.

use anyhow::{Context, Result};
use quick_xml::de::from_str;
use serde::Deserialize;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

use crate::feeds::{plain_text, FeedItem};

/// Entries older than this never qualify.
pub const RECENCY_WINDOW_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Deserialize)]
struct RssDoc {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "content:encoded")]
    content: Option<String>,
}

/// A parsed feed entry before recency filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: Option<String>,
    /// Unix seconds; 0 when the date was missing or unparseable, which
    /// compares as far in the past.
    pub published_at: u64,
    pub summary: Option<String>,
    pub content: Option<String>,
}

fn parse_rfc2822_to_unix(ts: &str) -> u64 {
    OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC).unix_timestamp())
        .and_then(|x| u64::try_from(x).ok())
        .unwrap_or(0)
}

pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let doc: RssDoc = from_str(xml).context("parsing rss xml")?;

    Ok(doc
        .channel
        .items
        .into_iter()
        .map(|it| FeedEntry {
            title: it.title.unwrap_or_default(),
            link: it.link,
            published_at: it
                .pub_date
                .as_deref()
                .map(parse_rfc2822_to_unix)
                .unwrap_or(0),
            summary: it.description,
            content: it.content,
        })
        .collect())
}

/// Keep entries published strictly within the last 24 hours. An entry
/// exactly 24h old does not qualify.
pub fn recent_entries(entries: Vec<FeedEntry>, now_unix: u64) -> Vec<FeedEntry> {
    entries
        .into_iter()
        .filter(|e| now_unix.saturating_sub(e.published_at) < RECENCY_WINDOW_SECS)
        .collect()
}

/// Map qualifying entries to bridge-page items. The snippet prefers the
/// summary over the full content; entries without a link carry nothing the
/// bridge page can use and are dropped.
pub fn to_feed_items(entries: Vec<FeedEntry>) -> Vec<FeedItem> {
    entries
        .into_iter()
        .filter_map(|e| {
            let url = e.link?;
            let snippet = e
                .summary
                .as_deref()
                .or(e.content.as_deref())
                .map(plain_text)
                .unwrap_or_default();
            Some(FeedItem {
                url,
                title: e.title,
                snippet,
            })
        })
        .collect()
}
