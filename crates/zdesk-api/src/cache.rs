// Response cache
//
// Short-lived memoization of idempotent GET calls, keyed by a
// deterministic request fingerprint. The cache is advisory only: every
// store failure is logged and treated as a miss, so a broken cache layer
// can never fail a call.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::CacheError;
use crate::request::Params;

/// Flat TTL applied to every cacheable call.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Key-value boundary the response cache is built on.
///
/// Implementations may back this with any keyed store, durable or
/// in-memory. Expiry may be enforced by the store itself or checked on
/// read; [`MemoryStore`] does the latter.
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry, `None` on miss or expiry.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Insert with absolute expiry `now + ttl`, overwriting any existing
    /// entry for the same key.
    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Bulk-delete every entry under `prefix`, returning how many were
    /// removed.
    fn delete_by_prefix(&self, prefix: &str) -> Result<u64, CacheError>;
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Concurrent in-memory [`CacheStore`].
///
/// Reads and writes on a shared key are independent; last write wins.
/// Expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, MemoryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // The shard ref must be dropped before removing the stale entry.
        let expired = match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if Utc::now() < entry.expires_at => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
        };

        if expired {
            self.entries.remove(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_owned(),
            MemoryEntry {
                value,
                expires_at: Utc::now() + ttl,
            },
        );
        Ok(())
    }

    fn delete_by_prefix(&self, prefix: &str) -> Result<u64, CacheError> {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0u64;
        for stale in &keys {
            if self.entries.remove(stale).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Advisory response cache in front of a [`CacheStore`].
///
/// Holds the client's key namespace, the flat TTL, and the debug bypass
/// flag. Only the dispatcher decides *what* is cacheable (GET without
/// bypass); this type decides *how* entries are keyed and stored.
pub(crate) struct ResponseCache {
    store: Arc<dyn CacheStore>,
    namespace: String,
    ttl: Duration,
    bypass: bool,
}

impl ResponseCache {
    pub(crate) fn new(
        store: Arc<dyn CacheStore>,
        namespace: impl Into<String>,
        ttl: Duration,
        bypass: bool,
    ) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            ttl,
            bypass,
        }
    }

    /// Whether caching is disabled for the life of this client.
    pub(crate) fn bypassed(&self) -> bool {
        self.bypass
    }

    /// Deterministic fingerprint for a logical request.
    ///
    /// The route stays verbatim in the key for debuggability; the params
    /// contribute a content hash of their canonical serialization, so two
    /// maps with identical content produce the same key regardless of
    /// insertion order.
    pub(crate) fn key(&self, route: &str, suffixed: bool, params: &Params) -> String {
        let canonical = serde_json::Value::Object(params.clone()).to_string();
        let digest = Sha256::digest(canonical.as_bytes());
        let encoding = if suffixed { "json" } else { "raw" };
        format!("{}:{route}:{encoding}:{digest:x}", self.namespace)
    }

    /// Look up a prior response; any store error is a miss.
    pub(crate) fn lookup(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(hit) => hit,
            Err(e) => {
                warn!("cache lookup failed for {key}: {e}");
                None
            }
        }
    }

    /// Store a response body; any store error is logged and dropped.
    pub(crate) fn store(&self, key: &str, value: String) {
        if let Err(e) = self.store.set(key, value, self.ttl) {
            warn!("cache store failed for {key}: {e}");
        }
    }

    /// Remove every entry under this client's namespace, reporting how
    /// many were removed. Maintenance entry point; store failures do
    /// surface here.
    pub(crate) fn invalidate_all(&self) -> Result<u64, CacheError> {
        self.store.delete_by_prefix(&format!("{}:", self.namespace))
    }
}
