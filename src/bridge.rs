// src/bridge.rs
// Bridge page generation. External posts (Medium articles, YouTube videos)
// cannot be submitted for indexing on their own domains, so we render one
// locally hosted page that links out to them, write a single-entry sitemap
// next to it, and submit the bridge page itself.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::config::AppConfig;
use crate::feeds::FeedItem;
use crate::submit::result::SubmissionResult;
use crate::submit::SubmitEngine;

const ARTICLE_MARKER: &str = "medium.com";
const VIDEO_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Boost input: either a bare URL or a full item.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemInput {
    Url(String),
    Item(FeedItem),
}

impl ItemInput {
    fn into_feed_item(self) -> FeedItem {
        match self {
            ItemInput::Url(url) => FeedItem {
                url,
                title: String::new(),
                snippet: String::new(),
            },
            ItemInput::Item(item) => item,
        }
    }
}

pub struct BridgeGenerator {
    cfg: Arc<AppConfig>,
    engine: Arc<SubmitEngine>,
}

impl BridgeGenerator {
    pub fn new(cfg: Arc<AppConfig>, engine: Arc<SubmitEngine>) -> Self {
        Self { cfg, engine }
    }

    /// Normalize boost inputs and publish. Entry point for the API/CLI.
    pub async fn boost(&self, inputs: Vec<ItemInput>) -> Result<SubmissionResult> {
        let items: Vec<FeedItem> = inputs.into_iter().map(ItemInput::into_feed_item).collect();
        self.publish_and_submit(&items).await
    }

    /// Render the bridge page and sitemap, write both under the public dir,
    /// then submit the page's own URL. The returned record is the
    /// submission's.
    pub async fn publish_and_submit(&self, items: &[FeedItem]) -> Result<SubmissionResult> {
        let now = chrono::Utc::now();
        let html = render_page(items, now);
        let bridge_url = self.cfg.bridge_page_url();
        let sitemap = render_sitemap(&bridge_url, now);

        tokio::fs::create_dir_all(&self.cfg.public_dir)
            .await
            .context("public dir")?;
        tokio::fs::write(self.cfg.bridge_page_path(), html)
            .await
            .context("writing bridge page")?;
        tokio::fs::write(self.cfg.sitemap_path(), sitemap)
            .await
            .context("writing sitemap")?;

        tracing::info!(url = %bridge_url, items = items.len(), "bridge page published");
        Ok(self.engine.submit(&bridge_url).await)
    }
}

fn is_article(item: &FeedItem) -> bool {
    item.url.contains(ARTICLE_MARKER)
}

fn is_video(item: &FeedItem) -> bool {
    VIDEO_MARKERS.iter().any(|m| item.url.contains(m))
}

/// Card title for an article: the item title, else the URL's last path
/// segment with hyphens read as spaces.
fn article_title(item: &FeedItem) -> String {
    if !item.title.trim().is_empty() {
        return item.title.trim().to_string();
    }
    let path = item.url.split(['?', '#']).next().unwrap_or_default();
    let slug = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .replace('-', " ");
    if slug.is_empty() {
        "Read Article".to_string()
    } else {
        slug
    }
}

/// Video id from either link form: the path tail for youtu.be short links,
/// the `v` query parameter for canonical watch URLs.
fn video_id(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    if parsed.host_str()?.contains("youtu.be") {
        return parsed
            .path_segments()?
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string)
            .filter(|s| !s.is_empty());
    }
    parsed
        .query_pairs()
        .find(|(k, _)| k == "v")
        .map(|(_, v)| v.into_owned())
        .filter(|s| !s.is_empty())
}

/// Structured-data block enumerating every input item by position, classified
/// or not.
fn item_list_json(items: &[FeedItem]) -> String {
    let elements: Vec<serde_json::Value> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::json!({
                "@type": "ListItem",
                "position": i + 1,
                "url": item.url,
            })
        })
        .collect();
    let list = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "itemListElement": elements,
    });
    serde_json::to_string_pretty(&list).unwrap_or_else(|_| "{}".to_string())
}

fn render_page(items: &[FeedItem], now: chrono::DateTime<chrono::Utc>) -> String {
    let mut cards = String::new();

    for item in items.iter().filter(|i| is_article(i)) {
        let title = html_escape::encode_text(&article_title(item)).to_string();
        let href = html_escape::encode_double_quoted_attribute(&item.url).to_string();
        let snippet = if item.snippet.trim().is_empty() {
            String::new()
        } else {
            format!(
                "\n            <p class=\"snippet\">{}</p>",
                html_escape::encode_text(item.snippet.trim())
            )
        };
        cards.push_str(&format!(
            r#"
        <article class="card">
            <span class="tag tag-article">Article</span>
            <a href="{href}" target="_blank" rel="dofollow">{title}</a>{snippet}
            <div class="meta">Read on Medium</div>
        </article>"#
        ));
    }

    for item in items.iter().filter(|i| is_video(i)) {
        // No extractable id, no card; the item still counts in the item list.
        let Some(id) = video_id(&item.url) else {
            continue;
        };
        let href = html_escape::encode_double_quoted_attribute(&item.url).to_string();
        let thumb = format!("https://img.youtube.com/vi/{id}/mqdefault.jpg");
        cards.push_str(&format!(
            r#"
        <article class="card">
            <span class="tag tag-video">Video</span>
            <a href="{href}" target="_blank" rel="dofollow" class="yt-link">Watch Video</a>
            <img src="{thumb}" alt="Video thumbnail">
            <div class="meta">Watch on YouTube</div>
        </article>"#
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Featured Content - {date}</title>
    <meta name="description" content="A curated list of recent articles and videos.">
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 800px; margin: 0 auto; padding: 2rem; line-height: 1.6; background: #f9f9f9; }}
        .card {{ background: white; border: 1px solid #ddd; padding: 1.5rem; margin-bottom: 1rem; border-radius: 8px; }}
        a {{ text-decoration: none; color: #1a8917; font-weight: bold; font-size: 1.2rem; display: block; margin-bottom: 0.5rem; }}
        .yt-link {{ color: #ff0000; }}
        .snippet {{ color: #333; margin: 0.5rem 0; }}
        .meta {{ color: #666; font-size: 0.9rem; }}
        img {{ width: 100%; max-width: 320px; border-radius: 4px; margin-top: 10px; }}
        .tag {{ display: inline-block; padding: 2px 8px; border-radius: 4px; font-size: 0.8rem; font-weight: bold; margin-right: 8px; }}
        .tag-article {{ background: #e6f7e9; color: #1a8917; }}
        .tag-video {{ background: #ffe6e6; color: #ff0000; }}
    </style>
    <script type="application/ld+json">
{item_list}
    </script>
</head>
<body>
    <h1>Recommended Content</h1>
    <p>Updated: {updated}</p>
    <div class="cards">{cards}
    </div>
</body>
</html>"#,
        date = now.format("%Y-%m-%d"),
        item_list = item_list_json(items),
        updated = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        cards = cards,
    )
}

fn render_sitemap(bridge_url: &str, now: chrono::DateTime<chrono::Utc>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
   <url>
      <loc>{loc}</loc>
      <lastmod>{lastmod}</lastmod>
      <changefreq>daily</changefreq>
      <priority>1.0</priority>
   </url>
</urlset>"#,
        loc = bridge_url,
        lastmod = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    )
}
