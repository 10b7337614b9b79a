//! Consumption plan generation.
//!
//! Collapses a batch of cache events into one invalidation per affected user.

use std::collections::HashSet;
use std::fmt;

use super::events::CacheEvent;
use super::keys::FeedKey;

/// Invalidation actions derived from a batch of events.
///
/// Events are deduplicated by event id, and repeated events for the same
/// user collapse into a single key: however many times a user was banned,
/// warned, or edited within the batch, their feed entry is dropped once.
#[derive(Debug, Default)]
pub struct ConsumptionPlan {
    /// Feed entries to invalidate.
    pub invalidate_keys: HashSet<FeedKey>,
}

impl fmt::Display for ConsumptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConsumptionPlan {{ invalidate: {} }}",
            self.invalidate_keys.len()
        )
    }
}

impl ConsumptionPlan {
    /// Merge a batch of events into a plan.
    pub fn from_events(events: Vec<CacheEvent>) -> Self {
        let mut plan = Self::default();
        let mut seen_ids = HashSet::new();

        for event in events {
            if !seen_ids.insert(event.id) {
                continue;
            }
            plan.invalidate_keys
                .insert(FeedKey::user(event.kind.user_id()));
        }

        plan
    }

    /// Check if the plan has any actions to execute.
    pub fn is_empty(&self) -> bool {
        self.invalidate_keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::cache::events::EventKind;

    fn make_event(kind: EventKind, epoch: u64) -> CacheEvent {
        CacheEvent::new(kind, epoch)
    }

    #[test]
    fn ban_invalidates_the_users_feed() {
        let user_id = Uuid::new_v4();
        let events = vec![make_event(EventKind::UserBanned { user_id }, 0)];
        let plan = ConsumptionPlan::from_events(events);

        assert!(plan.invalidate_keys.contains(&FeedKey::user(user_id)));
    }

    #[test]
    fn repeated_events_for_one_user_collapse() {
        let user_id = Uuid::new_v4();
        let shout_id = Uuid::new_v4();
        let events = vec![
            make_event(EventKind::UserWarned { user_id }, 0),
            make_event(EventKind::ShoutRemoved { user_id, shout_id }, 1),
            make_event(EventKind::UserBanned { user_id }, 2),
        ];
        let plan = ConsumptionPlan::from_events(events);

        assert_eq!(plan.invalidate_keys.len(), 1);
    }

    #[test]
    fn distinct_users_keep_distinct_keys() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let events = vec![
            make_event(EventKind::UserBanned { user_id: first }, 0),
            make_event(EventKind::UserWarned { user_id: second }, 1),
        ];
        let plan = ConsumptionPlan::from_events(events);

        assert_eq!(plan.invalidate_keys.len(), 2);
        assert!(plan.invalidate_keys.contains(&FeedKey::user(first)));
        assert!(plan.invalidate_keys.contains(&FeedKey::user(second)));
    }

    #[test]
    fn dedupe_by_event_id() {
        let event = make_event(
            EventKind::ProfileEdited {
                user_id: Uuid::new_v4(),
            },
            0,
        );

        let plan = ConsumptionPlan::from_events(vec![event.clone(), event]);

        assert_eq!(plan.invalidate_keys.len(), 1);
    }

    #[test]
    fn display_format() {
        let plan = ConsumptionPlan::default();
        let display = format!("{plan}");
        assert!(display.contains("ConsumptionPlan"));
        assert!(display.contains("invalidate: 0"));
    }

    #[test]
    fn is_empty() {
        let plan = ConsumptionPlan::default();
        assert!(plan.is_empty());

        let events = vec![make_event(
            EventKind::UserBanned {
                user_id: Uuid::new_v4(),
            },
            0,
        )];
        assert!(!ConsumptionPlan::from_events(events).is_empty());
    }
}
