//! SEO Autopilot — Binary Entrypoint
//! Boots the Axum HTTP server, wiring config, shared state, and the feed
//! scheduler.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seo_autopilot::api::{self, AppState};
use seo_autopilot::bridge::BridgeGenerator;
use seo_autopilot::config::AppConfig;
use seo_autopilot::credentials::CredentialPool;
use seo_autopilot::feeds::registry::FeedRegistry;
use seo_autopilot::feeds::watcher::{spawn_feed_scheduler, FeedWatcher};
use seo_autopilot::history::SubmissionHistory;
use seo_autopilot::submit::transport::HttpTransport;
use seo_autopilot::submit::SubmitEngine;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("seo_autopilot=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = Arc::new(AppConfig::from_env());
    let pool = CredentialPool::load(&cfg);
    let history = SubmissionHistory::load(cfg.history_file()).await;
    let transport = Arc::new(HttpTransport::new());

    let engine = Arc::new(SubmitEngine::new(
        Arc::clone(&cfg),
        pool,
        history,
        transport,
    ));
    let bridge = Arc::new(BridgeGenerator::new(Arc::clone(&cfg), Arc::clone(&engine)));
    let registry = Arc::new(FeedRegistry::load(cfg.feeds_file()).await);
    let watcher = Arc::new(FeedWatcher::new(registry, Arc::clone(&bridge)));

    spawn_feed_scheduler(Arc::clone(&watcher), cfg.feed_check_interval_secs);
    tracing::info!(
        feeds = watcher.registry().len().await,
        interval_secs = cfg.feed_check_interval_secs,
        "feed autopilot scheduled"
    );

    let state = AppState {
        engine,
        watcher,
        bridge,
    };
    let router = api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!(%addr, site_url = %cfg.site_url, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
