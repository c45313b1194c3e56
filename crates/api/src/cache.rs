//! In-process TTL cache for published-content lists.
//!
//! Implements the core [`PublishedCache`] trait over a
//! `RwLock<HashMap>`. Entries expire after a fixed TTL; command handlers
//! invalidate the keys their state change affects, so the TTL only
//! bounds staleness from writes that bypass the API (e.g. manual SQL).

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use devdocs_core::content::ContentRecord;
use devdocs_core::store::PublishedCache;

struct Entry {
    records: Vec<ContentRecord>,
    expires_at: Instant,
}

/// TTL-bounded published-list cache.
pub struct TtlPublishedCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
}

impl TtlPublishedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl PublishedCache for TtlPublishedCache {
    fn get(&self, key: &str) -> Option<Vec<ContentRecord>> {
        {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.records.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Expired: drop it under the write lock.
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        None
    }

    fn put(&self, key: &str, records: Vec<ContentRecord>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            Entry {
                records,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use devdocs_core::queries::published_cache_key;

    #[test]
    fn put_then_get_returns_records() {
        let cache = TtlPublishedCache::new(Duration::from_secs(60));
        let key = published_cache_key(Some(1));

        cache.put(&key, vec![]);
        assert_eq!(cache.get(&key), Some(vec![]));
    }

    #[test]
    fn missing_key_returns_none() {
        let cache = TtlPublishedCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("published_content_all"), None);
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = TtlPublishedCache::new(Duration::from_secs(60));
        let key = published_cache_key(None);

        cache.put(&key, vec![]);
        cache.invalidate(&key);
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let cache = TtlPublishedCache::new(Duration::ZERO);
        let key = published_cache_key(Some(2));

        cache.put(&key, vec![]);
        // TTL of zero expires immediately.
        assert_eq!(cache.get(&key), None);
    }
}
