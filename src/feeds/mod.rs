// src/feeds/mod.rs
pub mod registry;
pub mod rss;
pub mod watcher;

use serde::{Deserialize, Serialize};

/// One qualifying feed entry, reduced to what the bridge page needs.
/// Ephemeral: built per cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// Reduce feed markup to plain text: decode entities, strip tags, collapse
/// whitespace.
pub fn plain_text(s: &str) -> String {
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();

    let decoded = html_escape::decode_html_entities(s).to_string();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let stripped = re_tags.replace_all(&decoded, " ");
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&stripped, " ").trim().to_string()
}
