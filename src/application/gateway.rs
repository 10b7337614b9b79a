//! Gateway traits describing the platform API transport.
//!
//! The cache core is indifferent to how responses are produced; it consumes
//! these seams. Retry and backoff belong to the transport implementation, not
//! here: a failed call surfaces as-is, and the cache keeps serving whatever
//! it accumulated before.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;
use whistle_api_types::UserFeedResponse;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("platform API returned status {status}")]
    Status { status: u16 },
    #[error("transport failure: {message}")]
    Transport { message: String },
    #[error("malformed platform response: {message}")]
    MalformedResponse { message: String },
}

impl GatewayError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}

/// Read access to the platform's user-feed endpoint.
#[async_trait]
pub trait FeedGateway: Send + Sync {
    /// Fetch one page of a user's feed together with their profile patch.
    async fn fetch_user_feed(
        &self,
        user_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<UserFeedResponse, GatewayError>;
}

/// Moderation mutations against the platform.
#[async_trait]
pub trait ModerationGateway: Send + Sync {
    async fn ban_user(&self, user_id: Uuid, reason: &str) -> Result<(), GatewayError>;

    async fn warn_user(&self, user_id: Uuid, reason: &str) -> Result<(), GatewayError>;

    async fn remove_shout(&self, user_id: Uuid, shout_id: Uuid) -> Result<(), GatewayError>;
}
