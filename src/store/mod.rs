//! Key-value persistence for client-side state.
//!
//! The resilience layer and the session both persist small string values
//! (tokens, timestamps) that must survive process restarts. The storage is
//! advisory: a failed read or write degrades to "value absent" rather than
//! propagating an error, so callers never have to handle IO failures for
//! data that is only a cache of server-side truth.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Abstraction over durable client-side key-value storage.
///
/// Injected into the components that persist state so tests can use an
/// in-memory fake instead of touching the filesystem.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `None` when the key is absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value. Last write wins; failures are logged, not surfaced.
    fn set(&self, key: &str, value: &str);

    /// Remove a value if present.
    fn remove(&self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

/// File-backed store: one file per key under a state directory.
///
/// Keys are restricted to `[A-Za-z0-9_-]` by the callers in this crate, so
/// they are used as file names directly.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: PathBuf) -> Self {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to create state directory");
        }
        Self { dir }
    }

    /// Store rooted at the default per-user state directory.
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("podesk");
        Self::new(dir)
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read state file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::write(self.path(key), value) {
            tracing::warn!(key, error = %e, "Failed to write state file");
        }
    }

    fn remove(&self, key: &str) {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key, error = %e, "Failed to remove state file"),
        }
    }
}
