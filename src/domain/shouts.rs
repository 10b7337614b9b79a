//! Shout records as accumulated in the feed cache.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;
use whistle_api_types::ShoutDto;

use crate::domain::types::ShoutState;

/// One shout (post) in a user's feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoutRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub state: ShoutState,
    pub report_count: u32,
    pub created_at: OffsetDateTime,
}

impl From<&ShoutDto> for ShoutRecord {
    fn from(dto: &ShoutDto) -> Self {
        Self {
            id: dto.id,
            author_id: dto.author_id,
            body: dto.body.clone(),
            state: dto.state.into(),
            report_count: dto.report_count,
            created_at: dto.created_at,
        }
    }
}
