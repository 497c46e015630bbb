//! Namespaced key/value storage with per-entry TTL.
//!
//! Mirrors the browser-side storage the front end keeps tokens in: every key
//! lives under a namespace, entries may carry an expiry, and an expired entry
//! reads as absent. Single owner; mutation goes through `&mut self`.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// A stored entry with optional expiry.
#[derive(Debug, Clone)]
struct StorageEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl StorageEntry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Storage keyed by `(namespace, key)`.
#[derive(Debug, Default)]
pub struct TtlStorage {
    entries: HashMap<String, StorageEntry>,
}

impl TtlStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a composite storage key.
    fn storage_key(namespace: &str, key: &str) -> String {
        format!("{namespace}:{key}")
    }

    /// Get a value if it exists and has not expired.
    pub fn get(&self, namespace: &str, key: &str) -> Option<String> {
        let now = Utc::now();
        self.entries
            .get(&Self::storage_key(namespace, key))
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Insert or replace a value. `ttl_secs` of `None` never expires; neither
    /// does a TTL too large to represent as a timestamp.
    pub fn set(&mut self, namespace: &str, key: &str, value: String, ttl_secs: Option<i64>) {
        let now = Utc::now();
        let expires_at = ttl_secs.and_then(|secs| {
            match Duration::try_seconds(secs).and_then(|ttl| now.checked_add_signed(ttl)) {
                Some(at) => Some(at),
                None if secs > 0 => None,
                None => Some(now),
            }
        });
        self.entries.insert(
            Self::storage_key(namespace, key),
            StorageEntry { value, expires_at },
        );
    }

    /// Remove every entry in a namespace, leaving other namespaces intact.
    pub fn clear_namespace(&mut self, namespace: &str) {
        let prefix = format!("{namespace}:");
        self.entries.retain(|sk, _| !sk.starts_with(&prefix));
    }

    /// Drop entries whose TTL has passed.
    pub fn purge_expired(&mut self) {
        let now = Utc::now();
        self.entries.retain(|_, entry| entry.is_live(now));
    }
}
