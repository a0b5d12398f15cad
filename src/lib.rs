// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod bridge;
pub mod config;
pub mod credentials;
pub mod feeds;
pub mod history;
pub mod submit;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::bridge::BridgeGenerator;
pub use crate::config::AppConfig;
pub use crate::credentials::CredentialPool;
pub use crate::feeds::watcher::{spawn_feed_scheduler, FeedWatcher};
pub use crate::feeds::FeedItem;
pub use crate::history::SubmissionHistory;
pub use crate::submit::result::{ServiceOutcome, SubmissionResult};
pub use crate::submit::transport::HttpTransport;
pub use crate::submit::SubmitEngine;
