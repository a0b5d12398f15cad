// src/credentials.rs
// Service-account credential pool. Blobs are loaded once at startup from the
// environment (primary slot plus numbered extras) or, failing that, from the
// configured key file. Selection is uniform-random per call so load spreads
// across quota-limited keys.

use rand::Rng;

use crate::config::AppConfig;
use crate::submit::google::ServiceAccountKey;

pub const ENV_PRIMARY_KEY: &str = "GOOGLE_KEY_JSON";
/// Numbered extra slots: GOOGLE_KEY_JSON_1 .. GOOGLE_KEY_JSON_4.
pub const EXTRA_KEY_SLOTS: u32 = 4;

/// An opaque credential blob. Interpreted only at the point of use.
#[derive(Debug, Clone)]
pub struct Credential {
    blob: String,
}

impl Credential {
    pub fn new(blob: impl Into<String>) -> Self {
        Self { blob: blob.into() }
    }

    /// Parse the blob as a service-account key. Malformed blobs are an
    /// outcome for the caller to record, not a crash.
    pub fn service_account(&self) -> anyhow::Result<ServiceAccountKey> {
        serde_json::from_str(&self.blob)
            .map_err(|e| anyhow::anyhow!("credential blob is not a service-account key: {e}"))
    }
}

#[derive(Debug, Default)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
}

impl CredentialPool {
    /// Read credentials in priority order: primary env slot, numbered extra
    /// slots, then (only if no env slot yielded data) the key file.
    pub fn load(cfg: &AppConfig) -> Self {
        let mut credentials = Vec::new();

        if let Some(blob) = env_slot(ENV_PRIMARY_KEY) {
            tracing::info!(slot = ENV_PRIMARY_KEY, "indexing credential found in environment");
            credentials.push(Credential::new(blob));
        }
        for i in 1..=EXTRA_KEY_SLOTS {
            let name = format!("{ENV_PRIMARY_KEY}_{i}");
            if let Some(blob) = env_slot(&name) {
                tracing::info!(slot = %name, "indexing credential found in environment");
                credentials.push(Credential::new(blob));
            }
        }

        if credentials.is_empty() {
            match std::fs::read_to_string(&cfg.google_key_file) {
                Ok(blob) if !blob.trim().is_empty() => {
                    tracing::info!(path = %cfg.google_key_file.display(), "indexing credential loaded from key file");
                    credentials.push(Credential::new(blob));
                }
                Ok(_) => {
                    tracing::warn!(path = %cfg.google_key_file.display(), "key file is empty; indexing submissions will be skipped");
                }
                Err(e) => {
                    tracing::info!(
                        path = %cfg.google_key_file.display(),
                        error = %e,
                        "no indexing credentials configured; indexing submissions will be skipped"
                    );
                }
            }
        }

        Self { credentials }
    }

    pub fn from_blobs<I, S>(blobs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            credentials: blobs.into_iter().map(Credential::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Uniform-random pick; memoryless, no affinity between calls.
    pub fn select(&self) -> Option<&Credential> {
        self.select_with(&mut rand::rng())
    }

    /// Pure selection over the list and an injected random source, so tests
    /// can pass a seeded rng.
    pub fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Credential> {
        if self.credentials.is_empty() {
            return None;
        }
        self.credentials.get(rng.random_range(0..self.credentials.len()))
    }
}

fn env_slot(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
