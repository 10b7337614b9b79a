//! Page-numbered pagination of a user's feed.

use thiserror::Error;
use uuid::Uuid;

/// One page of one user's feed.
///
/// Page 1 is the reset page: resolving it replaces whatever was accumulated
/// for the user. `user_id` alone determines the cache key; `page` and `limit`
/// are volatile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPageRequest {
    pub user_id: Uuid,
    pub page: u32,
    pub limit: u32,
}

impl FeedPageRequest {
    pub fn new(user_id: Uuid, page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage(page));
        }
        if limit == 0 {
            return Err(PaginationError::InvalidLimit(limit));
        }
        Ok(Self {
            user_id,
            page,
            limit,
        })
    }

    /// Whether this request targets the reset page.
    pub fn is_reset(&self) -> bool {
        self.page == 1
    }
}

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(u32),
    #[error("page limit must be positive, got {0}")]
    InvalidLimit(u32),
}
