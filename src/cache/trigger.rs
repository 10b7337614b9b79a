//! Cache trigger service.
//!
//! Provides a high-level API for publishing cache events and optionally
//! consuming them immediately.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::config::CacheConfig;
use super::consumer::CacheConsumer;
use super::events::{EventKind, EventQueue};

/// Cache trigger for publishing cache events.
///
/// Moderation write paths call the convenience methods after a successful
/// mutation, so the stale feed entry is dropped before the console reads the
/// user again.
///
/// # Usage
///
/// ```ignore
/// // After the platform confirms the ban:
/// trigger.user_banned(user_id).await;
/// ```
pub struct CacheTrigger {
    config: CacheConfig,
    queue: Arc<EventQueue>,
    consumer: Arc<CacheConsumer>,
}

impl CacheTrigger {
    /// Create a new cache trigger.
    pub fn new(config: CacheConfig, queue: Arc<EventQueue>, consumer: Arc<CacheConsumer>) -> Self {
        Self {
            config,
            queue,
            consumer,
        }
    }

    /// Publish an event and optionally consume immediately.
    ///
    /// If `consume_now` is true, the consumer runs right after publishing.
    /// Otherwise events wait for the next explicit consumption.
    pub async fn trigger(&self, kind: EventKind, consume_now: bool) {
        if !self.config.is_enabled() {
            debug!(event_kind = ?kind, "Cache trigger skipped: cache disabled");
            return;
        }

        self.queue.publish(kind);

        if consume_now {
            self.consumer.consume().await;
        }
    }

    /// Trigger a user ban event.
    pub async fn user_banned(&self, user_id: Uuid) {
        self.trigger(EventKind::UserBanned { user_id }, true).await;
    }

    /// Trigger a user warning event.
    pub async fn user_warned(&self, user_id: Uuid) {
        self.trigger(EventKind::UserWarned { user_id }, true).await;
    }

    /// Trigger a profile edit event.
    pub async fn profile_edited(&self, user_id: Uuid) {
        self.trigger(EventKind::ProfileEdited { user_id }, true)
            .await;
    }

    /// Trigger a shout removal event.
    pub async fn shout_removed(&self, user_id: Uuid, shout_id: Uuid) {
        self.trigger(EventKind::ShoutRemoved { user_id, shout_id }, true)
            .await;
    }

    /// Get the underlying config.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get the underlying event queue.
    pub fn queue(&self) -> &Arc<EventQueue> {
        &self.queue
    }

    /// Get the underlying consumer.
    pub fn consumer(&self) -> &Arc<CacheConsumer> {
        &self.consumer
    }
}
