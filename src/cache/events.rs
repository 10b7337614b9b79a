//! Cache event system.
//!
//! Moderation mutations publish events here; the consumer drains them and
//! invalidates the affected feed entries.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use metrics::gauge;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::lock::mutex_lock;

const SOURCE: &str = "cache::events";

const METRIC_CACHE_EVENT_QUEUE_LEN: &str = "whistle_cache_event_queue_len";

/// Monotonic epoch for ordering events.
///
/// Each event gets a unique, monotonically increasing epoch number, so the
/// latest event for a user can be identified when a batch is merged.
pub type Epoch = u64;

/// Cache event with idempotency and ordering support.
#[derive(Debug, Clone)]
pub struct CacheEvent {
    /// Unique identifier for idempotency (UUIDv4).
    pub id: Uuid,
    /// Monotonic epoch for ordering within this process.
    pub epoch: Epoch,
    /// The type of cache event.
    pub kind: EventKind,
    /// When the event was created.
    pub timestamp: OffsetDateTime,
}

impl CacheEvent {
    /// Create a new cache event with the given kind and epoch.
    pub fn new(kind: EventKind, epoch: Epoch) -> Self {
        Self {
            id: Uuid::new_v4(),
            epoch,
            kind,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

/// Moderation mutations that invalidate a user's feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A user was banned.
    UserBanned { user_id: Uuid },
    /// A user received a warning.
    UserWarned { user_id: Uuid },
    /// A user's profile fields were edited out of band.
    ProfileEdited { user_id: Uuid },
    /// One of the user's shouts was removed by a moderator.
    ShoutRemoved { user_id: Uuid, shout_id: Uuid },
}

impl EventKind {
    /// The user whose feed entry this event staleness affects.
    pub fn user_id(&self) -> Uuid {
        match self {
            EventKind::UserBanned { user_id }
            | EventKind::UserWarned { user_id }
            | EventKind::ProfileEdited { user_id }
            | EventKind::ShoutRemoved { user_id, .. } => *user_id,
        }
    }
}

/// In-memory event queue for cache invalidation.
///
/// Events are published by moderation write paths and consumed by the cache
/// consumer. A mutex suffices since contention is expected to be low.
pub struct EventQueue {
    queue: Mutex<VecDeque<CacheEvent>>,
    epoch_counter: AtomicU64,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            epoch_counter: AtomicU64::new(0),
        }
    }

    /// Get the next epoch number.
    pub fn next_epoch(&self) -> Epoch {
        self.epoch_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Publish an event to the queue.
    pub fn publish(&self, kind: EventKind) {
        let epoch = self.next_epoch();
        let event = CacheEvent::new(kind.clone(), epoch);

        info!(
            event_id = %event.id,
            event_epoch = event.epoch,
            event_kind = ?kind,
            "Cache event enqueued"
        );

        let mut queue = mutex_lock(&self.queue, SOURCE, "publish");
        queue.push_back(event);
        gauge!(METRIC_CACHE_EVENT_QUEUE_LEN).set(queue.len() as f64);
    }

    /// Drain up to `limit` events from the queue, in FIFO order.
    pub fn drain(&self, limit: usize) -> Vec<CacheEvent> {
        let mut queue = mutex_lock(&self.queue, SOURCE, "drain");
        let count = limit.min(queue.len());
        let events: Vec<CacheEvent> = queue.drain(..count).collect();
        gauge!(METRIC_CACHE_EVENT_QUEUE_LEN).set(queue.len() as f64);
        events
    }

    /// Get the current queue length.
    pub fn len(&self) -> usize {
        mutex_lock(&self.queue, SOURCE, "len").len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all events from the queue.
    pub fn clear(&self) {
        mutex_lock(&self.queue, SOURCE, "clear").clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;

    #[test]
    fn event_creation() {
        let kind = EventKind::UserBanned {
            user_id: Uuid::nil(),
        };
        let event = CacheEvent::new(kind.clone(), 42);

        assert_eq!(event.epoch, 42);
        assert_eq!(event.kind, kind);
        assert!(!event.id.is_nil());
    }

    #[test]
    fn epoch_monotonicity() {
        let queue = EventQueue::new();

        let first = queue.next_epoch();
        let second = queue.next_epoch();
        let third = queue.next_epoch();

        assert!(first < second);
        assert!(second < third);
    }

    #[test]
    fn publish_and_drain_in_fifo_order() {
        let queue = EventQueue::new();
        let banned = Uuid::new_v4();
        let warned = Uuid::new_v4();

        queue.publish(EventKind::UserBanned { user_id: banned });
        queue.publish(EventKind::UserWarned { user_id: warned });
        queue.publish(EventKind::ProfileEdited {
            user_id: Uuid::new_v4(),
        });

        assert_eq!(queue.len(), 3);

        let events = queue.drain(2);
        assert_eq!(events.len(), 2);
        assert_eq!(queue.len(), 1);

        assert_eq!(events[0].kind, EventKind::UserBanned { user_id: banned });
        assert_eq!(events[1].kind, EventKind::UserWarned { user_id: warned });
    }

    #[test]
    fn drain_more_than_available() {
        let queue = EventQueue::new();

        queue.publish(EventKind::ProfileEdited {
            user_id: Uuid::new_v4(),
        });

        let events = queue.drain(100);
        assert_eq!(events.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn event_kind_names_the_affected_user() {
        let user_id = Uuid::new_v4();
        let shout_id = Uuid::new_v4();

        assert_eq!(EventKind::UserBanned { user_id }.user_id(), user_id);
        assert_eq!(
            EventKind::ShoutRemoved { user_id, shout_id }.user_id(),
            user_id
        );
    }

    #[test]
    fn clear_queue() {
        let queue = EventQueue::new();

        queue.publish(EventKind::UserWarned {
            user_id: Uuid::new_v4(),
        });
        assert!(!queue.is_empty());

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn event_queue_recovers_from_poisoned_lock() {
        let queue = EventQueue::new();

        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = queue.queue.lock().expect("queue lock acquired");
            panic!("poison queue lock");
        }));

        queue.publish(EventKind::UserBanned {
            user_id: Uuid::new_v4(),
        });
        assert_eq!(queue.len(), 1);
    }
}
