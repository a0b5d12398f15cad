// tests/feed_watcher.rs
//
// Feed cycle behavior with fixture XML and a controlled clock: recency
// gating, per-feed error isolation, and registry dedup.

mod common;

use std::sync::Arc;

use common::{engine_with, test_config, RecordingTransport};
use seo_autopilot::bridge::BridgeGenerator;
use seo_autopilot::credentials::CredentialPool;
use seo_autopilot::feeds::registry::FeedRegistry;
use seo_autopilot::feeds::watcher::FeedWatcher;

fn watcher(
    dir: &std::path::Path,
) -> (Arc<seo_autopilot::config::AppConfig>, Arc<RecordingTransport>, Arc<FeedWatcher>) {
    let cfg = Arc::new(test_config(dir));
    let transport = Arc::new(RecordingTransport::default());
    let engine = engine_with(Arc::clone(&cfg), CredentialPool::default(), Arc::clone(&transport));
    let bridge = Arc::new(BridgeGenerator::new(Arc::clone(&cfg), engine));
    let registry = Arc::new(FeedRegistry::empty(cfg.feeds_file()));
    (cfg, transport, Arc::new(FeedWatcher::new(registry, bridge)))
}

fn feed_xml(items: &[(&str, &str, chrono::DateTime<chrono::Utc>)]) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Fixture Feed</title>
"#,
    );
    for (title, link, published) in items {
        body.push_str(&format!(
            "    <item>\n      <title>{title}</title>\n      <link>{link}</link>\n      <pubDate>{}</pubDate>\n      <description>teaser</description>\n    </item>\n",
            published.to_rfc2822()
        ));
    }
    body.push_str("  </channel>\n</rss>\n");
    body
}

#[tokio::test]
async fn fresh_items_publish_one_bridge_page() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, transport, watcher) = watcher(dir.path());

    let now = chrono::Utc::now();
    let xml = feed_xml(&[
        ("New Post", "https://medium.com/@x/new-post", now - chrono::Duration::hours(2)),
        ("Also New", "https://medium.com/@x/also-new", now - chrono::Duration::hours(20)),
    ]);

    let result = watcher
        .process_feed_body("https://medium.com/feed/@x", &xml, now.timestamp() as u64)
        .await
        .unwrap();

    let record = result.expect("fresh items should produce a submission");
    assert_eq!(record.url, cfg.bridge_page_url());
    assert_eq!(transport.indexnow_urls(), vec![cfg.bridge_page_url()]);

    let html = tokio::fs::read_to_string(cfg.bridge_page_path()).await.unwrap();
    assert!(html.contains("New Post"));
    assert!(html.contains("Also New"));
}

#[tokio::test]
async fn stale_items_trigger_no_bridge_generation() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, transport, watcher) = watcher(dir.path());

    let now = chrono::Utc::now();
    let xml = feed_xml(&[
        ("Old", "https://medium.com/@x/old", now - chrono::Duration::hours(25)),
        ("Exactly A Day", "https://medium.com/@x/day", now - chrono::Duration::hours(24)),
    ]);

    let result = watcher
        .process_feed_body("https://medium.com/feed/@x", &xml, now.timestamp() as u64)
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(transport.indexnow_urls().is_empty());
    assert!(tokio::fs::metadata(cfg.bridge_page_path()).await.is_err());
}

#[tokio::test]
async fn unparseable_dates_count_as_stale() {
    let dir = tempfile::tempdir().unwrap();
    let (_cfg, transport, watcher) = watcher(dir.path());

    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Fixture Feed</title>
    <item>
      <title>Mystery Date</title>
      <link>https://medium.com/@x/mystery</link>
      <pubDate>sometime recently</pubDate>
    </item>
  </channel>
</rss>"#;

    let now = chrono::Utc::now().timestamp() as u64;
    let result = watcher
        .process_feed_body("https://medium.com/feed/@x", xml, now)
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(transport.indexnow_urls().is_empty());
}

#[tokio::test]
async fn malformed_feed_is_an_error_for_that_feed_only() {
    let dir = tempfile::tempdir().unwrap();
    let (_cfg, transport, watcher) = watcher(dir.path());

    let err = watcher
        .process_feed_body("https://broken.example/feed", "<rss><channel><item>", 0)
        .await;
    assert!(err.is_err());
    assert!(transport.indexnow_urls().is_empty());

    // The same watcher still processes a healthy feed afterwards.
    let now = chrono::Utc::now();
    let xml = feed_xml(&[(
        "Fine",
        "https://medium.com/@x/fine",
        now - chrono::Duration::minutes(5),
    )]);
    let result = watcher
        .process_feed_body("https://medium.com/feed/@x", &xml, now.timestamp() as u64)
        .await
        .unwrap();
    assert!(result.is_some());
}

#[tokio::test]
async fn add_feed_registers_once_and_reports_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let (_cfg, _transport, watcher) = watcher(dir.path());

    // Connection-refused target keeps the immediate background check local.
    let feed = "http://127.0.0.1:9/feed";
    assert!(watcher.add_feed(feed).await);
    assert!(!watcher.add_feed(feed).await);

    assert_eq!(watcher.registry().list().await, vec![feed.to_string()]);
}
