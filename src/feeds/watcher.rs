// src/feeds/watcher.rs
// The recurring feed check. Each cycle walks the registry, fetches every
// feed, and forwards anything published in the last 24 hours to the bridge
// page generator. One feed's failure never blocks the others.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::bridge::BridgeGenerator;
use crate::feeds::registry::FeedRegistry;
use crate::feeds::rss;
use crate::submit::result::SubmissionResult;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_checks_total", "Individual feed checks performed.");
        describe_counter!("feed_check_errors_total", "Feed checks that failed to fetch or parse.");
        describe_gauge!("feed_cycle_last_run_ts", "Unix ts when the feed cycle last ran.");
    });
}

#[derive(Clone)]
pub struct FeedWatcher {
    registry: Arc<FeedRegistry>,
    bridge: Arc<BridgeGenerator>,
    client: reqwest::Client,
}

impl FeedWatcher {
    pub fn new(registry: Arc<FeedRegistry>, bridge: Arc<BridgeGenerator>) -> Self {
        Self {
            registry,
            bridge,
            client: reqwest::Client::new(),
        }
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    /// One full cycle over the registered feeds. Errors are logged per feed
    /// and the walk continues.
    pub async fn check_all(&self) {
        ensure_metrics_described();
        let feeds = self.registry.list().await;
        tracing::info!(feeds = feeds.len(), "feed cycle start");

        for feed_url in feeds {
            counter!("feed_checks_total").increment(1);
            if let Err(e) = self.check_feed(&feed_url).await {
                counter!("feed_check_errors_total").increment(1);
                tracing::warn!(feed = %feed_url, error = %e, "feed check failed");
            }
        }

        let now = chrono::Utc::now().timestamp().max(0) as u64;
        gauge!("feed_cycle_last_run_ts").set(now as f64);
    }

    /// Fetch and process one feed. Returns the submission result when fresh
    /// items led to a bridge page, None otherwise.
    pub async fn check_feed(&self, feed_url: &str) -> Result<Option<SubmissionResult>> {
        tracing::info!(feed = %feed_url, "fetching feed");
        let body = self
            .client
            .get(feed_url)
            .send()
            .await
            .context("feed request")?
            .error_for_status()
            .context("feed response")?
            .text()
            .await
            .context("feed body")?;

        let now = chrono::Utc::now().timestamp().max(0) as u64;
        self.process_feed_body(feed_url, &body, now).await
    }

    /// Parse, filter by recency, and forward. Split out from the fetch so
    /// tests can drive it with fixture XML and a controlled clock.
    pub async fn process_feed_body(
        &self,
        feed_url: &str,
        xml: &str,
        now_unix: u64,
    ) -> Result<Option<SubmissionResult>> {
        let entries = rss::parse_feed(xml)?;
        let fresh = rss::recent_entries(entries, now_unix);
        if fresh.is_empty() {
            tracing::info!(feed = %feed_url, "no items in the last 24h");
            return Ok(None);
        }

        let items = rss::to_feed_items(fresh);
        if items.is_empty() {
            tracing::info!(feed = %feed_url, "fresh items carried no links");
            return Ok(None);
        }

        tracing::info!(feed = %feed_url, items = items.len(), "fresh items found, publishing bridge page");
        let result = self.bridge.publish_and_submit(&items).await?;
        Ok(Some(result))
    }

    /// Register a feed. On a fresh insert, one immediate best-effort check
    /// runs outside the schedule; the caller does not wait for it.
    pub async fn add_feed(&self, url: &str) -> bool {
        let added = self.registry.add(url).await;
        if added {
            let watcher = self.clone();
            let feed_url = url.to_string();
            tokio::spawn(async move {
                if let Err(e) = watcher.check_feed(&feed_url).await {
                    tracing::warn!(feed = %feed_url, error = %e, "initial feed check failed");
                }
            });
        }
        added
    }
}

/// Spawn the recurring cycle. The interval's first tick completes
/// immediately; it is consumed so the initial full check lands one period
/// after boot.
pub fn spawn_feed_scheduler(watcher: Arc<FeedWatcher>, interval_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.tick().await;
        loop {
            ticker.tick().await;
            watcher.check_all().await;
        }
    })
}
