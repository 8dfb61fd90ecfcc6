//! Optional in-process serialization of writes to one storage path.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-path async mutexes, created on demand and dropped when idle.
///
/// Disabled instances hand out no-op guards. Only writers inside this
/// process are serialized.
#[derive(Debug, Clone)]
pub struct PathLocks {
    enabled: bool,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// Held for the duration of one replace sequence.
#[derive(Debug)]
pub struct PathGuard {
    guard: Option<OwnedMutexGuard<()>>,
    path: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl PathLocks {
    /// Create a lock table; `enabled = false` makes every lock a no-op.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Wait for exclusive access to `path`.
    pub async fn acquire(&self, path: &str) -> PathGuard {
        if !self.enabled {
            return PathGuard {
                guard: None,
                path: path.to_string(),
                locks: self.locks.clone(),
            };
        }
        let mutex = self
            .locks
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        PathGuard {
            guard: Some(mutex.lock_owned().await),
            path: path.to_string(),
            locks: self.locks.clone(),
        }
    }

    /// Number of paths with a live mutex.
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        if self.guard.take().is_some() {
            // Only the table still references the mutex once nobody waits on it.
            self.locks
                .remove_if(&self.path, |_, m| Arc::strong_count(m) == 1);
        }
    }
}
