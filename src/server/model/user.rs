//! Durable user records written on every OAuth login.

use chrono::{DateTime, Utc};

use crate::server::{error::internal::InternalError, util::parse::parse_u64_from_string};

/// User who has logged in to the dashboard at least once.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Discord ID of the user
    pub discord_id: u64,
    pub username: String,
    pub avatar: Option<String>,
    pub email: Option<String>,
    /// Time of the most recent successful OAuth callback.
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted domain model
    /// - `Err(InternalError::ParseStringId)` - Stored Discord ID is not a u64
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, InternalError> {
        Ok(Self {
            discord_id: parse_u64_from_string(entity.discord_id)?,
            username: entity.username,
            avatar: entity.avatar,
            email: entity.email,
            last_login_at: entity.last_login_at,
        })
    }
}

/// Parameters for upserting a user after OAuth login.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub discord_id: u64,
    pub username: String,
    pub avatar: Option<String>,
    pub email: Option<String>,
}
