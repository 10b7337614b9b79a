//! Shared response types for the Silent Whistle platform API.
//!
//! The console talks to the platform's user-feed endpoint, which returns a
//! user's scalar profile fields together with one page of their shouts. The
//! profile portion is a *patch*: the server is free to omit fields it did not
//! recompute for this response, so every scalar is optional here and the
//! consumer overlays present fields onto its accumulated state.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// One page of a user's feed: profile patch, shouts, pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFeedResponse {
    pub user: UserPatch,
    #[serde(default)]
    pub shouts: Vec<ShoutDto>,
    pub meta: FeedMeta,
}

/// Partial view of a user's scalar profile fields.
///
/// Only `id` is mandatory; absent fields mean "unchanged", not "cleared".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatusDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shout_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_count: Option<u64>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub joined_at: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_seen_at: Option<OffsetDateTime>,
}

impl UserPatch {
    /// A patch carrying nothing but the user id.
    pub fn empty(id: Uuid) -> Self {
        Self {
            id,
            display_name: None,
            handle: None,
            status: None,
            shout_count: None,
            report_count: None,
            joined_at: None,
            last_seen_at: None,
        }
    }
}

/// Moderation status of a user account on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatusDto {
    Active,
    Warned,
    Banned,
}

/// One shout (post) in a feed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoutDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub state: ShoutStateDto,
    #[serde(default)]
    pub report_count: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Moderation state of a shout on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoutStateDto {
    Visible,
    Flagged,
    Removed,
}

/// Pagination metadata for the shout sub-collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMeta {
    /// Server-side total number of shouts for this user.
    pub total: u64,
}
