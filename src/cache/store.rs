//! Feed entry storage.
//!
//! One LRU-bounded map from user key to accumulated feed entry. The entry is
//! a single mutable cell per key: only `update_with` writes it, and it does so
//! under the write lock, so consumers never observe a half-merged entry and
//! every merge applies against the state current at its own completion time.

use std::sync::RwLock;

use lru::LruCache;
use metrics::counter;

use super::config::CacheConfig;
use super::keys::FeedKey;
use super::lock::{rw_read, rw_write};
use super::merge::{FeedEntry, MergeError};

const SOURCE: &str = "cache::store";

const METRIC_FEED_CACHE_EVICT_TOTAL: &str = "whistle_feed_cache_evict_total";

/// In-memory feed entry storage with LRU eviction.
pub struct FeedStore {
    entries: RwLock<LruCache<FeedKey, FeedEntry>>,
}

impl FeedStore {
    /// Create a new store with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(config.feed_entry_limit_non_zero())),
        }
    }

    /// Latest accumulated entry for `key`, if any.
    pub fn get(&self, key: &FeedKey) -> Option<FeedEntry> {
        rw_write(&self.entries, SOURCE, "get").get(key).cloned()
    }

    /// Run a merge against the live entry for `key` and publish the result.
    ///
    /// The closure sees the current entry (or `None`) and returns the merged
    /// value. On error nothing is written: the previously stored entry stays
    /// byte-for-byte intact.
    pub fn update_with<F>(&self, key: FeedKey, merge_fn: F) -> Result<FeedEntry, MergeError>
    where
        F: FnOnce(Option<&FeedEntry>) -> Result<FeedEntry, MergeError>,
    {
        let mut entries = rw_write(&self.entries, SOURCE, "update_with");
        let merged = merge_fn(entries.peek(&key))?;
        if let Some((evicted_key, _)) = entries.push(key, merged.clone()) {
            if evicted_key != key {
                counter!(METRIC_FEED_CACHE_EVICT_TOTAL).increment(1);
            }
        }
        Ok(merged)
    }

    /// Drop the entry for `key`; the next read for it starts from nothing.
    pub fn invalidate(&self, key: &FeedKey) {
        rw_write(&self.entries, SOURCE, "invalidate").pop(key);
    }

    /// Clear all cached entries.
    pub fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear").clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
