// src/submit/transport.rs
// Outbound call seam for the fan-out engine. Production goes through one
// shared reqwest client; tests inject a recording/fault transport.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::submit::google::{self, ServiceAccountKey};

pub const INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

/// IndexNow submission body. Field names are the protocol's.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexNowRequest {
    pub host: String,
    pub key: String,
    pub key_location: String,
    pub url_list: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IndexingResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Authenticated "URL updated" notification to the indexing API.
    async fn publish_indexing(&self, key: &ServiceAccountKey, url: &str)
        -> Result<IndexingResponse>;

    /// Keyed IndexNow notification. Returns the upstream status code.
    async fn push_indexnow(&self, req: &IndexNowRequest) -> Result<u16>;

    /// One legacy update ping. The caller discards the result.
    async fn send_ping(&self, endpoint: &str) -> Result<()>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Only the client's own defaults apply; the legacy ping endpoints are
    /// largely defunct and deliberately get no extra timeout handling.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn publish_indexing(
        &self,
        key: &ServiceAccountKey,
        url: &str,
    ) -> Result<IndexingResponse> {
        let token = google::fetch_access_token(&self.client, key).await?;

        let resp = self
            .client
            .post(google::INDEXING_ENDPOINT)
            .bearer_auth(token)
            .json(&serde_json::json!({ "url": url, "type": "URL_UPDATED" }))
            .send()
            .await
            .context("indexing api request")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("indexing api returned {status}: {body}");
        }
        let body = resp.json::<serde_json::Value>().await.ok();
        Ok(IndexingResponse {
            status: status.as_u16(),
            body,
        })
    }

    async fn push_indexnow(&self, req: &IndexNowRequest) -> Result<u16> {
        let resp = self
            .client
            .post(INDEXNOW_ENDPOINT)
            .json(req)
            .send()
            .await
            .context("indexnow request")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("indexnow returned {status}: {body}");
        }
        Ok(status.as_u16())
    }

    async fn send_ping(&self, endpoint: &str) -> Result<()> {
        self.client
            .get(endpoint)
            .send()
            .await
            .with_context(|| format!("ping {endpoint}"))?;
        Ok(())
    }
}
