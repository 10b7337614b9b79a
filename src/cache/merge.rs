//! Feed entry merging.
//!
//! The merge step combines a previously accumulated feed entry with a freshly
//! fetched response. It is a pure function: the caller (the store) decides
//! when and under which lock the result is published, so a failed merge can
//! never corrupt or truncate what was accumulated before.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use whistle_api_types::UserFeedResponse;

use crate::application::pagination::FeedPageRequest;
use crate::domain::shouts::ShoutRecord;
use crate::domain::users::UserProfile;

/// Accumulated cache value for one user's feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    /// Scalar profile fields, last-write-wins per field.
    pub profile: UserProfile,
    /// Accumulated shouts in insertion order: server order for page 1, then
    /// appended order for later pages. Never contains a duplicate id.
    pub shouts: Vec<ShoutRecord>,
    /// Server-side total from the most recent response.
    pub total: u64,
    /// Page number of the most recent request that touched this entry.
    pub last_page: u32,
}

impl FeedEntry {
    /// Whether the server holds shouts beyond what has been accumulated.
    pub fn has_more(&self) -> bool {
        (self.shouts.len() as u64) < self.total
    }
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("malformed feed response: {reason}")]
    MalformedResponse { reason: String },
}

impl MergeError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Whether a request for `requested_page` warrants a network fetch.
///
/// A fetch is warranted when nothing was fetched before, or when the page
/// differs from the one the previous request asked for. Repeating the same
/// page is served from cache.
pub fn should_refetch(previous_page: Option<u32>, requested_page: u32) -> bool {
    match previous_page {
        None => true,
        Some(previous) => previous != requested_page,
    }
}

/// Merge a fetched response into the accumulated entry for its key.
///
/// - No existing entry: the response becomes the entry as-is.
/// - Page 1: the shout sequence and total are replaced wholesale.
/// - Page > 1: shouts with unseen ids are appended in server order; the
///   total is taken from this response (latest wins).
/// - Scalar profile fields overlay per-field in every case.
///
/// A malformed response fails the merge without producing an entry.
pub fn merge(
    existing: Option<&FeedEntry>,
    incoming: &UserFeedResponse,
    request: &FeedPageRequest,
) -> Result<FeedEntry, MergeError> {
    validate(incoming, request)?;

    let mut profile = match existing {
        Some(entry) => entry.profile.clone(),
        None => UserProfile::new(request.user_id),
    };
    profile.apply(&incoming.user);

    let shouts = match existing {
        Some(entry) if !request.is_reset() => {
            let seen: HashSet<Uuid> = entry.shouts.iter().map(|shout| shout.id).collect();
            let mut shouts = entry.shouts.clone();
            shouts.extend(
                incoming
                    .shouts
                    .iter()
                    .filter(|shout| !seen.contains(&shout.id))
                    .map(ShoutRecord::from),
            );
            shouts
        }
        // First merge for this key, or an explicit page-1 read: fresh state.
        _ => incoming.shouts.iter().map(ShoutRecord::from).collect(),
    };

    Ok(FeedEntry {
        profile,
        shouts,
        total: incoming.meta.total,
        last_page: request.page,
    })
}

fn validate(incoming: &UserFeedResponse, request: &FeedPageRequest) -> Result<(), MergeError> {
    if incoming.user.id != request.user_id {
        return Err(MergeError::malformed(format!(
            "user id mismatch: requested {}, response carries {}",
            request.user_id, incoming.user.id
        )));
    }

    for shout in &incoming.shouts {
        if shout.id.is_nil() {
            return Err(MergeError::malformed("shout with nil id"));
        }
        if shout.author_id != request.user_id {
            return Err(MergeError::malformed(format!(
                "shout {} authored by {}, not the requested user",
                shout.id, shout.author_id
            )));
        }
    }

    Ok(())
}
