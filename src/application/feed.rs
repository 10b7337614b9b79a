//! Read-through feed access for console consumers.
//!
//! `FeedService` is the surface the console binds tables and detail views to:
//! it serves the accumulated entry when the request repeats the previous page,
//! fetches and merges otherwise, and never lets a failed fetch disturb what
//! was accumulated before, so stale data stays renderable next to the error.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::application::gateway::{FeedGateway, GatewayError};
use crate::application::pagination::{FeedPageRequest, PaginationError};
use crate::cache::{FeedEntry, FeedKey, FeedStore, MergeError, merge, should_refetch};

const METRIC_FEED_CACHE_HIT_TOTAL: &str = "whistle_feed_cache_hit_total";
const METRIC_FEED_CACHE_MISS_TOTAL: &str = "whistle_feed_cache_miss_total";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Pagination(#[from] PaginationError),
}

/// Read-through access to one user's profile plus shout feed.
pub struct FeedService {
    gateway: Arc<dyn FeedGateway>,
    store: Arc<FeedStore>,
}

impl FeedService {
    pub fn new(gateway: Arc<dyn FeedGateway>, store: Arc<FeedStore>) -> Self {
        Self { gateway, store }
    }

    /// Resolve a feed page: serve the accumulated entry when the request
    /// repeats the previously fetched page, fetch and merge otherwise.
    pub async fn resolve(&self, request: &FeedPageRequest) -> Result<FeedEntry, FeedError> {
        let key = FeedKey::of(request);

        if let Some(entry) = self.store.get(&key) {
            if !should_refetch(Some(entry.last_page), request.page) {
                counter!(METRIC_FEED_CACHE_HIT_TOTAL).increment(1);
                debug!(key = %key, page = request.page, "Feed served from cache");
                return Ok(entry);
            }
        }

        counter!(METRIC_FEED_CACHE_MISS_TOTAL).increment(1);
        self.refresh(request).await
    }

    /// Fetch the requested page and merge it into the accumulated entry,
    /// regardless of what is cached.
    pub async fn refresh(&self, request: &FeedPageRequest) -> Result<FeedEntry, FeedError> {
        let response = self
            .gateway
            .fetch_user_feed(request.user_id, request.page, request.limit)
            .await?;

        let key = FeedKey::of(request);
        let entry = self
            .store
            .update_with(key, |existing| merge(existing, &response, request))?;

        debug!(
            key = %key,
            page = request.page,
            shouts = entry.shouts.len(),
            total = entry.total,
            "Feed entry merged"
        );

        Ok(entry)
    }

    /// Latest accumulated entry for the user, possibly stale, without any
    /// network activity.
    pub fn cached(&self, user_id: Uuid) -> Option<FeedEntry> {
        self.store.get(&FeedKey::user(user_id))
    }

    /// Whether "load more" should be offered for the user.
    ///
    /// False when nothing is cached yet: resolve the first page instead.
    pub fn has_more(&self, user_id: Uuid) -> bool {
        self.cached(user_id)
            .map(|entry| entry.has_more())
            .unwrap_or(false)
    }

    /// Fetch the next page after the accumulated one and merge it in.
    ///
    /// Starts from page 1 when nothing is cached; returns `None` when the
    /// accumulated entry already holds every shout the server reports.
    pub async fn load_more(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Option<FeedEntry>, FeedError> {
        match self.store.get(&FeedKey::user(user_id)) {
            None => {
                let request = FeedPageRequest::new(user_id, 1, limit)?;
                self.refresh(&request).await.map(Some)
            }
            Some(entry) if !entry.has_more() => Ok(None),
            Some(entry) => {
                let request = FeedPageRequest::new(user_id, entry.last_page + 1, limit)?;
                self.refresh(&request).await.map(Some)
            }
        }
    }

    /// Drop the accumulated entry for the user.
    ///
    /// The next resolve for any page refetches and rebuilds the entry
    /// wholesale, so a stale status field cannot survive a moderation action.
    pub fn invalidate(&self, user_id: Uuid) {
        self.store.invalidate(&FeedKey::user(user_id));
    }
}
