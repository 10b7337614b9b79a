//! Shared domain enumerations aligned with the platform API's wire enums.

use serde::{Deserialize, Serialize};
use whistle_api_types::{ShoutStateDto, UserStatusDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Warned,
    Banned,
}

impl From<UserStatusDto> for UserStatus {
    fn from(value: UserStatusDto) -> Self {
        match value {
            UserStatusDto::Active => UserStatus::Active,
            UserStatusDto::Warned => UserStatus::Warned,
            UserStatusDto::Banned => UserStatus::Banned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoutState {
    Visible,
    Flagged,
    Removed,
}

impl From<ShoutStateDto> for ShoutState {
    fn from(value: ShoutStateDto) -> Self {
        match value {
            ShoutStateDto::Visible => ShoutState::Visible,
            ShoutStateDto::Flagged => ShoutState::Flagged,
            ShoutStateDto::Removed => ShoutState::Removed,
        }
    }
}
