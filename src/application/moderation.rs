//! Moderation actions and their cache consequences.
//!
//! Every successful mutation fires the matching cache trigger, so the user's
//! accumulated feed entry is dropped before the console reads them again. A
//! failed mutation fires nothing: the cached entry is still accurate.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::gateway::{GatewayError, ModerationGateway};
use crate::cache::CacheTrigger;

/// Ban/warn/remove actions wired to cache invalidation.
pub struct ModerationService {
    gateway: Arc<dyn ModerationGateway>,
    trigger: Arc<CacheTrigger>,
}

impl ModerationService {
    pub fn new(gateway: Arc<dyn ModerationGateway>, trigger: Arc<CacheTrigger>) -> Self {
        Self { gateway, trigger }
    }

    /// Ban a user and invalidate their accumulated feed entry.
    pub async fn ban_user(&self, user_id: Uuid, reason: &str) -> Result<(), GatewayError> {
        self.gateway.ban_user(user_id, reason).await?;
        info!(user_id = %user_id, "User banned");
        self.trigger.user_banned(user_id).await;
        Ok(())
    }

    /// Warn a user and invalidate their accumulated feed entry.
    pub async fn warn_user(&self, user_id: Uuid, reason: &str) -> Result<(), GatewayError> {
        self.gateway.warn_user(user_id, reason).await?;
        info!(user_id = %user_id, "User warned");
        self.trigger.user_warned(user_id).await;
        Ok(())
    }

    /// Remove one of the user's shouts and invalidate their feed entry.
    pub async fn remove_shout(&self, user_id: Uuid, shout_id: Uuid) -> Result<(), GatewayError> {
        self.gateway.remove_shout(user_id, shout_id).await?;
        info!(user_id = %user_id, shout_id = %shout_id, "Shout removed");
        self.trigger.shout_removed(user_id, shout_id).await;
        Ok(())
    }
}
