// src/feeds/registry.rs
// The monitored feed set: an ordered list of feed URLs with uniqueness on
// insert, rewritten to disk as a JSON array on every addition.

use std::path::PathBuf;

use tokio::sync::Mutex;

#[derive(Debug)]
pub struct FeedRegistry {
    path: PathBuf,
    feeds: Mutex<Vec<String>>,
}

impl FeedRegistry {
    /// Load the persisted feed list; missing or malformed files start empty.
    pub async fn load(path: PathBuf) -> Self {
        let feeds = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<String>>(&bytes) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "feeds file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "feeds file unreadable, starting empty");
                Vec::new()
            }
        };

        Self {
            path,
            feeds: Mutex::new(feeds),
        }
    }

    pub fn empty(path: PathBuf) -> Self {
        Self {
            path,
            feeds: Mutex::new(Vec::new()),
        }
    }

    /// Insert a feed URL. Returns false (and leaves the list untouched) if
    /// it is already present; persists the full list on a fresh insert.
    pub async fn add(&self, url: &str) -> bool {
        let mut feeds = self.feeds.lock().await;
        if feeds.iter().any(|f| f == url) {
            return false;
        }
        feeds.push(url.to_string());

        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %self.path.display(), error = %e, "feeds dir");
                return true;
            }
        }
        match serde_json::to_vec_pretty(&*feeds) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&self.path, bytes).await {
                    tracing::warn!(path = %self.path.display(), error = %e, "feeds persist");
                }
            }
            Err(e) => tracing::warn!(error = %e, "feeds serialize"),
        }
        true
    }

    pub async fn list(&self) -> Vec<String> {
        self.feeds.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.feeds.lock().await.len()
    }
}
