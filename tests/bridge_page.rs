// tests/bridge_page.rs
//
// The bridge-page contract end to end: render, write page + sitemap, then
// submit the page's own URL exactly once.

mod common;

use std::sync::Arc;

use common::{engine_with, test_config, RecordingTransport};
use seo_autopilot::bridge::{BridgeGenerator, ItemInput};
use seo_autopilot::credentials::CredentialPool;
use seo_autopilot::feeds::FeedItem;

fn generator(
    dir: &std::path::Path,
) -> (Arc<seo_autopilot::config::AppConfig>, Arc<RecordingTransport>, BridgeGenerator) {
    let cfg = Arc::new(test_config(dir));
    let transport = Arc::new(RecordingTransport::default());
    let engine = engine_with(Arc::clone(&cfg), CredentialPool::default(), Arc::clone(&transport));
    let bridge = BridgeGenerator::new(Arc::clone(&cfg), engine);
    (cfg, transport, bridge)
}

#[tokio::test]
async fn article_and_video_items_produce_the_expected_page() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, transport, bridge) = generator(dir.path());

    let items = vec![
        FeedItem {
            url: "https://medium.com/@x/my-post".into(),
            title: String::new(),
            snippet: String::new(),
        },
        FeedItem {
            url: "https://youtu.be/abc123".into(),
            title: "T".into(),
            snippet: String::new(),
        },
    ];

    let result = bridge.publish_and_submit(&items).await.unwrap();

    // The submission targeted the bridge page itself, exactly once.
    assert_eq!(result.url, cfg.bridge_page_url());
    assert_eq!(transport.indexnow_urls(), vec![cfg.bridge_page_url()]);

    let html = tokio::fs::read_to_string(cfg.bridge_page_path()).await.unwrap();
    // One article card with the slug-derived title.
    assert!(html.contains("my post"));
    assert_eq!(html.matches("tag-article").count(), 2); // css class + card tag
    // One video card with the extracted id.
    assert!(html.contains("https://img.youtube.com/vi/abc123/mqdefault.jpg"));
    // Structured data enumerates exactly the two inputs.
    assert_eq!(html.matches(r#""@type": "ListItem""#).count(), 2);
}

#[tokio::test]
async fn sitemap_references_the_bridge_page() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, _transport, bridge) = generator(dir.path());

    bridge
        .publish_and_submit(&[FeedItem {
            url: "https://medium.com/@x/a-post".into(),
            title: String::new(),
            snippet: String::new(),
        }])
        .await
        .unwrap();

    let xml = tokio::fs::read_to_string(cfg.sitemap_path()).await.unwrap();
    assert_eq!(xml.matches("<url>").count(), 1);
    assert!(xml.contains(&format!("<loc>{}</loc>", cfg.bridge_page_url())));
    assert!(xml.contains("<changefreq>daily</changefreq>"));
    assert!(xml.contains("<priority>1.0</priority>"));
}

#[tokio::test]
async fn bare_urls_are_normalized_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, transport, bridge) = generator(dir.path());

    let result = bridge
        .boost(vec![
            ItemInput::Url("https://medium.com/@x/plain-string-post".into()),
            ItemInput::Item(FeedItem {
                url: "https://youtu.be/zzz999".into(),
                title: String::new(),
                snippet: String::new(),
            }),
        ])
        .await
        .unwrap();

    assert_eq!(result.url, cfg.bridge_page_url());
    assert_eq!(transport.indexnow_urls().len(), 1);

    let html = tokio::fs::read_to_string(cfg.bridge_page_path()).await.unwrap();
    assert!(html.contains("plain string post"));
    assert!(html.contains("zzz999"));
}

#[tokio::test]
async fn unclassified_items_stay_in_the_structured_data() {
    let dir = tempfile::tempdir().unwrap();
    let (cfg, _transport, bridge) = generator(dir.path());

    bridge
        .publish_and_submit(&[
            FeedItem {
                url: "https://medium.com/@x/kept".into(),
                title: String::new(),
                snippet: String::new(),
            },
            FeedItem {
                url: "https://example.com/dropped-from-cards".into(),
                title: String::new(),
                snippet: String::new(),
            },
        ])
        .await
        .unwrap();

    let html = tokio::fs::read_to_string(cfg.bridge_page_path()).await.unwrap();
    assert_eq!(html.matches(r#""@type": "ListItem""#).count(), 2);
    assert!(html.contains("https://example.com/dropped-from-cards"));
    // But no card was rendered for it.
    assert_eq!(html.matches("class=\"card\"").count(), 1);
}
