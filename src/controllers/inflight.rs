// src/controllers/inflight.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::AppError;

/// Keys of requests currently outstanding (per-row exports, per-attempt downloads).
///
/// Acquiring a key that is already held fails with `AppError::Busy`; different
/// keys never block each other.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, key: &str) -> Result<InFlightGuard, AppError> {
        if !self.lock().insert(key.to_string()) {
            tracing::debug!("Request {} already in flight", key);
            return Err(AppError::Busy(key.to_string()));
        }
        Ok(InFlightGuard {
            key: key.to_string(),
            keys: Arc::clone(&self.keys),
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    key: String,
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.remove(&self.key);
    }
}
