// src/history.rs
// Append-only, size-bounded submission log. Newest entry first. The whole
// sequence is rewritten to disk on every append; the file is a plain JSON
// array so the dashboard can consume it directly.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::submit::result::SubmissionResult;

pub const HISTORY_CAP: usize = 5000;

#[derive(Debug)]
pub struct SubmissionHistory {
    path: PathBuf,
    cap: usize,
    entries: Mutex<Vec<SubmissionResult>>,
}

impl SubmissionHistory {
    /// Load the persisted log. Missing or unreadable files are not fatal:
    /// the log starts empty and the service keeps running.
    pub async fn load(path: PathBuf) -> Self {
        Self::load_with_cap(path, HISTORY_CAP).await
    }

    pub async fn load_with_cap(path: PathBuf, cap: usize) -> Self {
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<SubmissionResult>>(&bytes) {
                Ok(mut v) => {
                    v.truncate(cap);
                    v
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "history file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "history file unreadable, starting empty");
                Vec::new()
            }
        };

        Self {
            path,
            cap,
            entries: Mutex::new(entries),
        }
    }

    /// Fresh empty log (tests and tools).
    pub fn with_capacity(path: PathBuf, cap: usize) -> Self {
        Self {
            path,
            cap,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Prepend a record and rewrite the persisted file, dropping entries
    /// beyond the cap. The guard is held across the write so no reader ever
    /// observes a partially applied mutation.
    pub async fn append(&self, record: SubmissionResult) {
        let mut entries = self.entries.lock().await;
        entries.insert(0, record);
        entries.truncate(self.cap);

        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %self.path.display(), error = %e, "history dir");
                return;
            }
        }
        let bytes = match serde_json::to_vec_pretty(&*entries) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, "history serialize");
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, bytes).await {
            tracing::warn!(path = %self.path.display(), error = %e, "history persist");
        }
    }

    /// Current in-memory sequence, newest first.
    pub async fn snapshot(&self) -> Vec<SubmissionResult> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
