//! Accumulated user profile state.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;
use whistle_api_types::UserPatch;

use crate::domain::types::UserStatus;

/// Scalar profile fields of a moderated user account, accumulated across
/// feed responses.
///
/// Every field except `id` is optional because the platform API returns
/// partial profile patches: an absent field means the server did not
/// recompute it, and the previously accumulated value stays in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub handle: Option<String>,
    pub status: Option<UserStatus>,
    pub shout_count: Option<u64>,
    pub report_count: Option<u64>,
    pub joined_at: Option<OffsetDateTime>,
    pub last_seen_at: Option<OffsetDateTime>,
}

impl UserProfile {
    /// An empty profile for a user we have not seen scalar fields for yet.
    pub fn new(id: Uuid) -> Self {
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

    /// Overlay the fields present in `patch` onto this profile.
    ///
    /// Present fields win; absent fields leave the accumulated value alone.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(display_name) = &patch.display_name {
            self.display_name = Some(display_name.clone());
        }
        if let Some(handle) = &patch.handle {
            self.handle = Some(handle.clone());
        }
        if let Some(status) = patch.status {
            self.status = Some(status.into());
        }
        if let Some(shout_count) = patch.shout_count {
            self.shout_count = Some(shout_count);
        }
        if let Some(report_count) = patch.report_count {
            self.report_count = Some(report_count);
        }
        if let Some(joined_at) = patch.joined_at {
            self.joined_at = Some(joined_at);
        }
        if let Some(last_seen_at) = patch.last_seen_at {
            self.last_seen_at = Some(last_seen_at);
        }
    }
}
