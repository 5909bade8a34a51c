//! In-memory HTTP response cache with a fixed time-to-live.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Default upper bound on cached responses.
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

/// Response bodies keyed by request URL.
///
/// Entries older than the TTL are treated as absent and dropped on the next
/// lookup, so recipe data is never served staler than `ttl`.
pub struct ResponseCache {
    ttl: Duration,
    max_entries: usize,
    entries: DashMap<String, CachedResponse>,
}

#[derive(Debug, Clone)]
struct CachedResponse {
    body: String,
    fetched_at: Instant,
}

/// Cache statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub fresh: usize,
    pub expired: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    /// A cache holding at most `max_entries` responses (minimum 1).
    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a cached body if one exists and has not expired.
    pub fn get(&self, url: &str) -> Option<String> {
        match self.entries.get(url) {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                return Some(entry.body.clone());
            }
            Some(_) => {}
            None => return None,
        }

        // The read guard must be gone before removing from the same shard.
        let ttl = self.ttl;
        self.entries
            .remove_if(url, |_, entry| entry.fetched_at.elapsed() >= ttl);
        None
    }

    /// Store a body. When the cache is full, expired entries are swept out
    /// first and then the oldest entries are evicted until there is room.
    pub fn put(&self, url: &str, body: String) {
        if !self.entries.contains_key(url) && self.entries.len() >= self.max_entries {
            self.purge_expired();
            while self.entries.len() >= self.max_entries {
                if !self.evict_oldest() {
                    break;
                }
            }
        }
        self.entries.insert(
            url.to_string(),
            CachedResponse {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    fn evict_oldest(&self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.fetched_at)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(url) => self.entries.remove(&url).is_some(),
            None => false,
        }
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        for entry in self.entries.iter() {
            if entry.fetched_at.elapsed() < self.ttl {
                stats.fresh += 1;
            } else {
                stats.expired += 1;
            }
        }
        stats
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/lookup.php?i=11007";

    #[test]
    fn test_hit_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        assert!(cache.get(URL).is_none());

        cache.put(URL, "{\"drinks\":null}".to_string());
        assert_eq!(cache.get(URL).as_deref(), Some("{\"drinks\":null}"));
        assert_eq!(
            cache.stats(),
            CacheStats {
                fresh: 1,
                expired: 0
            }
        );
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.put(URL, "body".to_string());
        assert_eq!(cache.stats().expired, 1);

        assert!(cache.get(URL).is_none());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_purge_and_clear() {
        let expired = ResponseCache::new(Duration::ZERO);
        expired.put("a", "1".to_string());
        expired.put("b", "2".to_string());
        expired.purge_expired();
        assert_eq!(expired.stats(), CacheStats::default());

        let fresh = ResponseCache::new(Duration::from_secs(60));
        fresh.put("a", "1".to_string());
        fresh.purge_expired();
        assert_eq!(fresh.stats().fresh, 1);
        fresh.clear();
        assert!(fresh.get("a").is_none());
    }

    #[test]
    fn test_full_cache_evicts_oldest() {
        let cache = ResponseCache::with_max_entries(Duration::from_secs(60), 2);
        cache.put("search:a", "1".to_string());
        std::thread::sleep(Duration::from_millis(2));
        cache.put("search:b", "2".to_string());
        std::thread::sleep(Duration::from_millis(2));
        cache.put("search:c", "3".to_string());

        assert_eq!(cache.stats().fresh, 2);
        assert!(cache.get("search:a").is_none());
        assert_eq!(cache.get("search:b").as_deref(), Some("2"));
        assert_eq!(cache.get("search:c").as_deref(), Some("3"));
    }

    #[test]
    fn test_refreshing_a_key_does_not_evict() {
        let cache = ResponseCache::with_max_entries(Duration::from_secs(60), 2);
        cache.put("a", "1".to_string());
        cache.put("b", "2".to_string());
        cache.put("b", "2b".to_string());

        assert_eq!(cache.get("a").as_deref(), Some("1"));
        assert_eq!(cache.get("b").as_deref(), Some("2b"));
    }

    #[test]
    fn test_many_distinct_urls_stay_bounded() {
        let cache = ResponseCache::with_max_entries(Duration::from_secs(60), 16);
        for i in 0..200 {
            cache.put(&format!("search.php?s=q{}", i), "{}".to_string());
        }
        assert_eq!(cache.stats().fresh, 16);
    }
}
