// src/submit/mod.rs
// The submission fan-out engine: one URL in, one SubmissionResult out,
// regardless of how the individual services fare.

pub mod google;
pub mod ping;
pub mod result;
pub mod transport;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use url::Url;

use crate::config::AppConfig;
use crate::credentials::CredentialPool;
use crate::history::SubmissionHistory;
use crate::submit::ping::PING_ENDPOINTS;
use crate::submit::result::{ServiceOutcome, SubmissionResult};
use crate::submit::transport::{IndexNowRequest, SubmissionTransport};

pub const SERVICE_GOOGLE: &str = "google";
pub const SERVICE_INDEXNOW: &str = "indexnow";
pub const SERVICE_PING: &str = "ping";

/// One-time metrics registration (so series show up for any exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("submissions_total", "URLs pushed through the fan-out engine.");
        describe_counter!(
            "submission_service_errors_total",
            "Per-service failures recorded in submission results."
        );
    });
}

/// Called synchronously after the history append, before `submit` returns.
pub type SubmitObserver = Box<dyn Fn(&SubmissionResult) + Send + Sync>;

pub struct SubmitEngine {
    cfg: Arc<AppConfig>,
    pool: CredentialPool,
    history: SubmissionHistory,
    transport: Arc<dyn SubmissionTransport>,
    observers: RwLock<Vec<SubmitObserver>>,
}

impl SubmitEngine {
    pub fn new(
        cfg: Arc<AppConfig>,
        pool: CredentialPool,
        history: SubmissionHistory,
        transport: Arc<dyn SubmissionTransport>,
    ) -> Self {
        Self {
            cfg,
            pool,
            history,
            transport,
            observers: RwLock::new(Vec::new()),
        }
    }

    pub fn history(&self) -> &SubmissionHistory {
        &self.history
    }

    pub fn subscribe(&self, observer: impl Fn(&SubmissionResult) + Send + Sync + 'static) {
        self.observers
            .write()
            .expect("observer lock poisoned")
            .push(Box::new(observer));
    }

    /// Submit one URL to every service. Never fails as a whole: each service
    /// settles into its own outcome and the assembled record is logged and
    /// returned either way.
    pub async fn submit(&self, url: &str) -> SubmissionResult {
        ensure_metrics_described();
        tracing::info!(%url, "submitting url");

        // The broadcast is dispatched first and never awaited; the engine
        // only waits for the two accountable services to settle.
        let broadcast = self.dispatch_broadcast();
        let (indexing, indexnow) = tokio::join!(
            self.indexing_outcome(url),
            self.indexnow_outcome(url)
        );

        for (service, outcome) in [
            (SERVICE_GOOGLE, &indexing),
            (SERVICE_INDEXNOW, &indexnow),
        ] {
            if outcome.is_error() {
                counter!("submission_service_errors_total", "service" => service).increment(1);
            }
        }
        counter!("submissions_total").increment(1);

        let mut services = BTreeMap::new();
        services.insert(SERVICE_GOOGLE.to_string(), indexing);
        services.insert(SERVICE_INDEXNOW.to_string(), indexnow);
        services.insert(SERVICE_PING.to_string(), broadcast);

        let record = SubmissionResult {
            url: url.to_string(),
            timestamp: chrono::Utc::now(),
            services,
        };

        self.history.append(record.clone()).await;
        for observer in self
            .observers
            .read()
            .expect("observer lock poisoned")
            .iter()
        {
            observer(&record);
        }

        record
    }

    /// Step 1: authenticated indexing call, gated on credential rotation.
    async fn indexing_outcome(&self, url: &str) -> ServiceOutcome {
        let Some(credential) = self.pool.select() else {
            return ServiceOutcome::skipped("no credential available");
        };
        let key = match credential.service_account() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(error = %e, "selected credential is unusable");
                return ServiceOutcome::skipped("credential blob is not a service-account key");
            }
        };

        match self.transport.publish_indexing(&key, url).await {
            Ok(resp) => ServiceOutcome::ok(resp.status, resp.body),
            Err(e) => {
                tracing::warn!(%url, error = %e, "indexing submission failed");
                ServiceOutcome::error(e)
            }
        }
    }

    /// Step 2: keyed IndexNow notification. A bad input URL fails only this
    /// step.
    async fn indexnow_outcome(&self, url: &str) -> ServiceOutcome {
        let host = match Url::parse(url) {
            Ok(parsed) => match parsed.host_str() {
                Some(h) => h.to_string(),
                None => return ServiceOutcome::error(format!("url has no host: {url}")),
            },
            Err(e) => return ServiceOutcome::error(format!("invalid url: {e}")),
        };

        let req = IndexNowRequest {
            host,
            key: self.cfg.indexnow_key.clone(),
            key_location: self.cfg.key_location(),
            url_list: vec![url.to_string()],
        };

        match self.transport.push_indexnow(&req).await {
            Ok(status) => ServiceOutcome::ok(status, None),
            Err(e) => {
                tracing::warn!(%url, error = %e, "indexnow submission failed");
                ServiceOutcome::error(e)
            }
        }
    }

    /// Step 3: fire one GET per legacy ping endpoint as detached tasks.
    /// Nothing waits on them and nothing records their results; the outcome
    /// is just the dispatch count.
    fn dispatch_broadcast(&self) -> ServiceOutcome {
        for &endpoint in PING_ENDPOINTS {
            let transport = Arc::clone(&self.transport);
            tokio::spawn(async move {
                if let Err(e) = transport.send_ping(endpoint).await {
                    tracing::debug!(endpoint, error = %e, "ping dropped");
                }
            });
        }
        ServiceOutcome::broadcast(PING_ENDPOINTS.len())
    }
}
