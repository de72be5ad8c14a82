//! The authenticated Discord identity carried in a browser session.

use serde::{Deserialize, Serialize};

use crate::{model::session::SessionDto, server::model::user::User};

/// Normalised identity derived from the Discord OAuth profile.
///
/// Immutable once built; a new login replaces it wholesale in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Discord user id (snowflake).
    pub discord_id: u64,
    /// Discord username.
    pub username: String,
    /// Avatar hash, if the user has one.
    pub avatar: Option<String>,
    /// Email, present when the `email` scope was granted.
    pub email: Option<String>,
}

impl Identity {
    /// Converts the identity into the session-info DTO.
    pub fn into_dto(self) -> SessionDto {
        SessionDto {
            discord_id: Some(self.discord_id.to_string()),
            username: Some(self.username),
            avatar: self.avatar,
            email: self.email,
        }
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            discord_id: user.discord_id,
            username: user.username,
            avatar: user.avatar,
            email: user.email,
        }
    }
}
