//! Cache configuration.
//!
//! Controls the feed cache via `whistle.toml`.

use std::num::NonZeroUsize;

use serde::Deserialize;

// Default values for cache configuration
const DEFAULT_FEED_ENTRY_LIMIT: usize = 200;
const DEFAULT_CONSUME_BATCH_LIMIT: usize = 100;

/// Cache configuration from `whistle.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the user feed cache.
    pub enable_feed_cache: bool,
    /// Maximum accumulated feed entries (one per user) kept in memory.
    pub feed_entry_limit: usize,
    /// Maximum events per consumption batch.
    pub consume_batch_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_feed_cache: true,
            feed_entry_limit: DEFAULT_FEED_ENTRY_LIMIT,
            consume_batch_limit: DEFAULT_CONSUME_BATCH_LIMIT,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enable_feed_cache: settings.enable_feed_cache,
            feed_entry_limit: settings.feed_entry_limit,
            consume_batch_limit: settings.consume_batch_limit,
        }
    }
}

impl CacheConfig {
    /// Returns true if the feed cache is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enable_feed_cache
    }

    /// Returns the entry limit as NonZeroUsize, clamping to 1 if zero.
    pub fn feed_entry_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.feed_entry_limit).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert!(config.enable_feed_cache);
        assert_eq!(config.feed_entry_limit, 200);
        assert_eq!(config.consume_batch_limit, 100);
    }

    #[test]
    fn is_enabled_follows_the_flag() {
        let config = CacheConfig {
            enable_feed_cache: false,
            ..Default::default()
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn non_zero_clamps_to_min() {
        let config = CacheConfig {
            feed_entry_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.feed_entry_limit_non_zero().get(), 1);
    }
}
