//! Cache key definitions.
//!
//! A feed entry is keyed by the user id alone. Page number and limit are
//! volatile request parameters and must never enter the key: every page of
//! one user's feed merges into the same entry.

use std::fmt;

use uuid::Uuid;

use crate::application::pagination::FeedPageRequest;

/// Identifies one user's accumulated feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedKey(Uuid);

impl FeedKey {
    /// Derive the key for a feed page request, discarding page and limit.
    pub fn of(request: &FeedPageRequest) -> Self {
        Self(request.user_id)
    }

    /// Key for a user id directly (invalidation paths).
    pub fn user(user_id: Uuid) -> Self {
        Self(user_id)
    }

    pub fn user_id(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for FeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user-feed-{}", self.0)
    }
}
