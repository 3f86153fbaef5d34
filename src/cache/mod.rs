use std::collections::HashMap;
use std::hash::Hash;

/// Default freshness horizon for CMS payloads.
pub(crate) const DEFAULT_TTL_MS: i64 = 60 * 60 * 1000;

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    saved_ms: i64,
}

/// In-memory cache with an explicit time-to-live.
///
/// Owned by whoever injects it (the HTTP content adapter); there is no process-wide
/// instance. Callers pass the clock so expiry is deterministic.
#[derive(Clone, Debug)]
pub(crate) struct TtlCache<K, V> {
    ttl_ms: i64,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }

    /// Fresh value for `key`; an expired entry is evicted on read.
    pub fn get(&mut self, key: &K, now_ms: i64) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => return None,
            Some(e) => now_ms - e.saved_ms > self.ttl_ms,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|e| e.value.clone())
    }

    pub fn insert(&mut self, key: K, value: V, now_ms: i64) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                saved_ms: now_ms,
            },
        );
    }

    /// Drop everything older than the TTL. Returns how many entries were removed.
    pub fn purge_expired(&mut self, now_ms: i64) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl_ms;
        self.entries.retain(|_, e| now_ms - e.saved_ms <= ttl);
        before - self.entries.len()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_within_ttl() {
        let mut c = TtlCache::new(1000);
        c.insert("about", "<p>x</p>".to_string(), 0);
        assert_eq!(c.get(&"about", 1000).as_deref(), Some("<p>x</p>"));
    }

    #[test]
    fn test_expired_entry_evicted_on_read() {
        let mut c = TtlCache::new(1000);
        c.insert("about", 1, 0);
        assert_eq!(c.get(&"about", 1001), None);
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn test_purge_expired_counts() {
        let mut c = TtlCache::new(DEFAULT_TTL_MS);
        c.insert("a", 1, 0);
        c.insert("b", 2, DEFAULT_TTL_MS);
        assert_eq!(c.purge_expired(DEFAULT_TTL_MS + 1), 1);
        assert_eq!(c.get(&"b", DEFAULT_TTL_MS + 1), Some(2));
    }
}
