// src/config.rs
// Environment-driven configuration. Loaded once at startup; every knob has a
// working local default so `cargo run` works with an empty environment.

use std::path::PathBuf;

pub const ENV_SITE_URL: &str = "SITE_URL";
pub const ENV_GOOGLE_KEY_FILE: &str = "GOOGLE_KEY_FILE";
pub const ENV_INDEXNOW_KEY: &str = "INDEXNOW_KEY";
pub const ENV_DATA_DIR: &str = "DATA_DIR";
pub const ENV_PUBLIC_DIR: &str = "PUBLIC_DIR";
pub const ENV_FEED_INTERVAL: &str = "FEED_CHECK_INTERVAL_SECS";
pub const ENV_PORT: &str = "PORT";

/// File name of the generated bridge page under the public dir.
pub const BRIDGE_PAGE_FILE: &str = "medium-bridge.html";
/// File name of the generated single-entry sitemap under the public dir.
pub const SITEMAP_FILE: &str = "sitemap.xml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origin the operator controls; forms the IndexNow key location and the
    /// bridge-page URL. No trailing slash.
    pub site_url: String,
    /// Fallback service-account key file, used only when no env slot is set.
    pub google_key_file: PathBuf,
    pub indexnow_key: String,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub feed_check_interval_secs: u64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let site_url = std::env::var(ENV_SITE_URL)
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            site_url,
            google_key_file: std::env::var(ENV_GOOGLE_KEY_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("service_account.json")),
            indexnow_key: std::env::var(ENV_INDEXNOW_KEY)
                .unwrap_or_else(|_| "indexnow-key".to_string()),
            data_dir: std::env::var(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            public_dir: std::env::var(ENV_PUBLIC_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            feed_check_interval_secs: std::env::var(ENV_FEED_INTERVAL)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            port: std::env::var(ENV_PORT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    pub fn feeds_file(&self) -> PathBuf {
        self.data_dir.join("feeds.json")
    }

    pub fn bridge_page_path(&self) -> PathBuf {
        self.public_dir.join(BRIDGE_PAGE_FILE)
    }

    pub fn sitemap_path(&self) -> PathBuf {
        self.public_dir.join(SITEMAP_FILE)
    }

    /// Public URL of the generated bridge page.
    pub fn bridge_page_url(&self) -> String {
        format!("{}/{}", self.site_url, BRIDGE_PAGE_FILE)
    }

    /// Where search engines expect the IndexNow key file to live.
    pub fn key_location(&self) -> String {
        format!("{}/{}.txt", self.site_url, self.indexnow_key)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            google_key_file: PathBuf::from("service_account.json"),
            indexnow_key: "indexnow-key".to_string(),
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public"),
            feed_check_interval_secs: 3600,
            port: 3000,
        }
    }
}
