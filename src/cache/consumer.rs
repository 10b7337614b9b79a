//! Cache consumer for executing consumption plans.
//!
//! Drains events from the queue and drops the affected feed entries.

use std::sync::Arc;
use std::time::Instant;

use metrics::histogram;
use tracing::{info, instrument};
use uuid::Uuid;

use super::config::CacheConfig;
use super::events::EventQueue;
use super::planner::ConsumptionPlan;
use super::store::FeedStore;

const METRIC_CACHE_CONSUME_MS: &str = "whistle_cache_consume_ms";

/// Cache consumer that processes events and maintains cache consistency.
///
/// The consumer:
/// 1. Drains events from the queue in bounded batches
/// 2. Generates a consumption plan from the events
/// 3. Drops each invalidated feed entry, so the next read for that user
///    refetches from the platform and rebuilds the entry wholesale
pub struct CacheConsumer {
    config: CacheConfig,
    store: Arc<FeedStore>,
    queue: Arc<EventQueue>,
}

impl CacheConsumer {
    /// Create a new cache consumer.
    pub fn new(config: CacheConfig, store: Arc<FeedStore>, queue: Arc<EventQueue>) -> Self {
        Self {
            config,
            store,
            queue,
        }
    }

    /// Consume pending events and execute the plan.
    ///
    /// Returns true if any events were processed.
    #[instrument(skip(self))]
    pub async fn consume(&self) -> bool {
        let consume_started_at = Instant::now();
        let events = self.queue.drain(self.config.consume_batch_limit);
        if events.is_empty() {
            return false;
        }

        let event_count = events.len();
        let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let plan = ConsumptionPlan::from_events(events);

        info!(
            event_count,
            event_ids = ?event_ids,
            plan = %plan,
            "Cache consumption starting"
        );

        if self.config.enable_feed_cache && !plan.is_empty() {
            for key in &plan.invalidate_keys {
                self.store.invalidate(key);
            }
        }

        info!(
            event_count,
            invalidated = plan.invalidate_keys.len(),
            "Cache consumption complete"
        );

        histogram!(METRIC_CACHE_CONSUME_MS)
            .record(consume_started_at.elapsed().as_secs_f64() * 1000.0);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::events::EventKind;
    use crate::cache::keys::FeedKey;
    use crate::cache::merge::FeedEntry;
    use crate::domain::users::UserProfile;

    fn populate(store: &FeedStore, user_id: Uuid) {
        store
            .update_with(FeedKey::user(user_id), |_| {
                Ok(FeedEntry {
                    profile: UserProfile::new(user_id),
                    shouts: Vec::new(),
                    total: 0,
                    last_page: 1,
                })
            })
            .expect("stored entry");
    }

    #[tokio::test]
    async fn consume_drops_invalidated_entries() {
        let config = CacheConfig::default();
        let store = Arc::new(FeedStore::new(&config));
        let queue = Arc::new(EventQueue::new());
        let consumer = CacheConsumer::new(config, store.clone(), queue.clone());

        let banned = Uuid::new_v4();
        let untouched = Uuid::new_v4();
        populate(&store, banned);
        populate(&store, untouched);

        queue.publish(EventKind::UserBanned { user_id: banned });

        assert!(consumer.consume().await);
        assert!(store.get(&FeedKey::user(banned)).is_none());
        assert!(store.get(&FeedKey::user(untouched)).is_some());
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn consume_without_events_is_a_no_op() {
        let config = CacheConfig::default();
        let store = Arc::new(FeedStore::new(&config));
        let queue = Arc::new(EventQueue::new());
        let consumer = CacheConsumer::new(config, store, queue);

        assert!(!consumer.consume().await);
    }

    #[tokio::test]
    async fn disabled_cache_drains_without_invalidating() {
        let config = CacheConfig {
            enable_feed_cache: false,
            ..Default::default()
        };
        let store = Arc::new(FeedStore::new(&config));
        let queue = Arc::new(EventQueue::new());
        let consumer = CacheConsumer::new(config, store.clone(), queue.clone());

        let user_id = Uuid::new_v4();
        populate(&store, user_id);
        queue.publish(EventKind::UserWarned { user_id });

        assert!(consumer.consume().await);
        assert!(store.get(&FeedKey::user(user_id)).is_some());
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn consume_respects_batch_limit() {
        let config = CacheConfig {
            consume_batch_limit: 1,
            ..Default::default()
        };
        let store = Arc::new(FeedStore::new(&config));
        let queue = Arc::new(EventQueue::new());
        let consumer = CacheConsumer::new(config, store, queue.clone());

        queue.publish(EventKind::UserBanned {
            user_id: Uuid::new_v4(),
        });
        queue.publish(EventKind::UserBanned {
            user_id: Uuid::new_v4(),
        });

        assert!(consumer.consume().await);
        assert_eq!(queue.len(), 1);
    }
}
