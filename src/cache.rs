//! Fingerprinted result cache with TTL expiry and LRU eviction.
//!
//! Entries expire `ttl_seconds` after insertion; expired entries are
//! invisible to `get` and removed lazily on lookup plus a sweep on every
//! `put`. Capacity is bounded by `max_size`: inserting at capacity evicts
//! the least-recently-accessed entry first.
//!
//! Hit/miss counters are lifetime metrics: every `get` increments exactly
//! one of them, and [`ContentCache::clear`] empties the entries
//! deliberately without resetting the counters.
//!
//! All state sits behind a single `Mutex` so a lookup and its statistics
//! update are observed as one atomic unit by concurrent callers.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

use crate::models::ContentRecord;

/// Clock returning epoch seconds. Injectable for tests.
pub type NowFn = Box<dyn Fn() -> i64 + Send + Sync>;

fn wall_clock() -> NowFn {
    Box::new(|| Utc::now().timestamp())
}

struct CacheEntry {
    value: ContentRecord,
    inserted_at: i64,
    expires_at: i64,
    last_accessed_at: i64,
    /// Monotonic access sequence backing LRU ordering; `last_accessed_at`
    /// alone cannot break ties within the same second.
    access_seq: u64,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    hit_count: u64,
    miss_count: u64,
    next_seq: u64,
}

/// Cache statistics. Counters cover the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate_percent: f64,
    pub total_requests: u64,
}

/// In-memory result cache keyed by request fingerprint.
pub struct ContentCache {
    inner: Mutex<CacheInner>,
    ttl_seconds: i64,
    max_size: usize,
    now_fn: NowFn,
}

impl ContentCache {
    pub fn new(ttl_seconds: i64, max_size: usize) -> Self {
        Self::with_clock(ttl_seconds, max_size, wall_clock())
    }

    /// Construct with an injected clock so tests can drive expiry without
    /// sleeping.
    pub fn with_clock(ttl_seconds: i64, max_size: usize, now_fn: NowFn) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                hit_count: 0,
                miss_count: 0,
                next_seq: 0,
            }),
            ttl_seconds,
            max_size,
            now_fn,
        }
    }

    /// Look up a fingerprint. Expired entries are treated as absent and
    /// removed. Exactly one of hit/miss is counted per call; a hit
    /// refreshes the entry's access time for LRU ordering.
    pub fn get(&self, fingerprint: &str) -> Option<ContentRecord> {
        let now = (self.now_fn)();
        let mut inner = self.inner.lock().unwrap();

        let expired = match inner.entries.get(fingerprint) {
            Some(entry) => entry.expires_at <= now,
            None => {
                inner.miss_count += 1;
                return None;
            }
        };
        if expired {
            inner.entries.remove(fingerprint);
            inner.miss_count += 1;
            return None;
        }

        inner.hit_count += 1;
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.entries.get_mut(fingerprint).map(|entry| {
            entry.last_accessed_at = now;
            entry.access_seq = seq;
            entry.value.clone()
        })
    }

    /// Insert a value. Sweeps expired entries first, then evicts the
    /// least-recently-accessed entry while at capacity. Never fails:
    /// eviction only removes cache benefit, not correctness.
    pub fn put(&self, fingerprint: String, value: ContentRecord) {
        let now = (self.now_fn)();
        let mut inner = self.inner.lock().unwrap();

        inner.entries.retain(|_, e| e.expires_at > now);

        // Replacing an existing key never needs eviction.
        if !inner.entries.contains_key(&fingerprint) {
            while inner.entries.len() >= self.max_size {
                let lru_key = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.access_seq)
                    .map(|(k, _)| k.clone());
                match lru_key {
                    Some(k) => {
                        inner.entries.remove(&k);
                    }
                    None => break,
                }
            }
        }

        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.entries.insert(
            fingerprint,
            CacheEntry {
                value,
                inserted_at: now,
                expires_at: now + self.ttl_seconds,
                last_accessed_at: now,
                access_seq: seq,
            },
        );
    }

    /// Snapshot of size and lifetime counters. The hit rate is 0 before
    /// any lookup has happened.
    pub fn stats(&self) -> CacheStats {
        let now = (self.now_fn)();
        let mut inner = self.inner.lock().unwrap();
        inner.entries.retain(|_, e| e.expires_at > now);

        let total_requests = inner.hit_count + inner.miss_count;
        let hit_rate_percent = if total_requests == 0 {
            0.0
        } else {
            inner.hit_count as f64 / total_requests as f64 * 100.0
        };

        CacheStats {
            size: inner.entries.len(),
            max_size: self.max_size,
            hit_count: inner.hit_count,
            miss_count: inner.miss_count,
            hit_rate_percent,
            total_requests,
        }
    }

    /// Empty the cache. Hit/miss counters are lifetime metrics and are
    /// intentionally NOT reset here; only entry state is dropped.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
    }

    /// Age in seconds of the entry for `fingerprint`, if present and live.
    pub fn entry_age_seconds(&self, fingerprint: &str) -> Option<i64> {
        let now = (self.now_fn)();
        let inner = self.inner.lock().unwrap();
        inner
            .entries
            .get(fingerprint)
            .filter(|e| e.expires_at > now)
            .map(|e| now - e.inserted_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Manually driven clock so each test controls expiry independently.
    fn manual_clock() -> (Arc<AtomicI64>, NowFn) {
        let time = Arc::new(AtomicI64::new(1_000_000));
        let handle = time.clone();
        (time, Box::new(move || handle.load(Ordering::SeqCst)))
    }

    fn record(id: &str) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            prompt: "p".to_string(),
            tone: "neutral".to_string(),
            length: 250,
            keywords: vec![],
            platform: None,
            content: "generated".to_string(),
            created_at: Utc::now(),
            quality_score: 80.0,
            seo_score: 50.0,
            sentiment: Sentiment::Neutral,
            confidence: 0.0,
        }
    }

    #[test]
    fn test_hit_and_miss_counting() {
        let (_, clock) = manual_clock();
        let cache = ContentCache::with_clock(3600, 10, clock);
        assert!(cache.get("fp1").is_none());
        cache.put("fp1".to_string(), record("a"));
        assert!(cache.get("fp1").is_some());
        assert!(cache.get("fp2").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 2);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.hit_count + stats.miss_count, stats.total_requests);
        let expected_rate = 1.0 / 3.0 * 100.0;
        assert!((stats.hit_rate_percent - expected_rate).abs() < 1e-9);
    }

    #[test]
    fn test_hit_rate_zero_when_no_lookups() {
        let (_, clock) = manual_clock();
        let cache = ContentCache::with_clock(3600, 10, clock);
        let stats = cache.stats();
        assert_eq!(stats.hit_rate_percent, 0.0);
        assert_eq!(stats.total_requests, 0);
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let (time, clock) = manual_clock();
        let cache = ContentCache::with_clock(60, 10, clock);
        cache.put("fp".to_string(), record("a"));
        assert!(cache.get("fp").is_some());
        time.fetch_add(61, Ordering::SeqCst);
        assert!(cache.get("fp").is_none());
        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }

    #[test]
    fn test_size_never_exceeds_max() {
        let (_, clock) = manual_clock();
        let cache = ContentCache::with_clock(3600, 3, clock);
        for i in 0..10 {
            cache.put(format!("fp{}", i), record("x"));
            assert!(cache.stats().size <= 3);
        }
    }

    #[test]
    fn test_lru_eviction_order() {
        let (_, clock) = manual_clock();
        let cache = ContentCache::with_clock(3600, 2, clock);
        cache.put("old".to_string(), record("a"));
        cache.put("newer".to_string(), record("b"));
        // Touch "old" so "newer" becomes least recently accessed
        assert!(cache.get("old").is_some());
        cache.put("third".to_string(), record("c"));

        assert!(cache.get("old").is_some());
        assert!(cache.get("third").is_some());
        assert!(cache.get("newer").is_none());
    }

    #[test]
    fn test_clear_keeps_counters() {
        let (_, clock) = manual_clock();
        let cache = ContentCache::with_clock(3600, 10, clock);
        cache.put("fp".to_string(), record("a"));
        assert!(cache.get("fp").is_some());
        assert!(cache.get("missing").is_none());

        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }

    #[test]
    fn test_replacing_existing_key_keeps_size() {
        let (_, clock) = manual_clock();
        let cache = ContentCache::with_clock(3600, 2, clock);
        cache.put("fp".to_string(), record("a"));
        cache.put("fp".to_string(), record("b"));
        assert_eq!(cache.stats().size, 1);
        assert_eq!(cache.get("fp").unwrap().id, "b");
    }

    #[test]
    fn test_concurrent_lookups_do_not_lose_counts() {
        let (_, clock) = manual_clock();
        let cache = Arc::new(ContentCache::with_clock(3600, 10, clock));
        cache.put("fp".to_string(), record("a"));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    let _ = cache.get("fp");
                    let _ = cache.get("absent");
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.total_requests, 1600);
        assert_eq!(stats.hit_count, 800);
        assert_eq!(stats.miss_count, 800);
    }
}
