//! Narrow interfaces over the Discord platform.
//!
//! The dispatcher only talks to Discord through these traits. Production
//! implementations wrap serenity's REST client and cache (`guild`) and the
//! songbird voice driver (`voice`); tests inject recording fakes.

use serenity::{
    all::{ChannelId, GuildId, RoleId, UserId},
    async_trait,
};
use tokio::sync::oneshot;
use url::Url;

use crate::server::{error::discord::DiscordError, model::action::ChannelKind};

pub mod guild;
pub mod voice;

#[cfg(test)]
pub mod fake;

/// Guild-scoped REST and cache operations.
///
/// An implementation is bound to the single configured guild.
#[async_trait]
pub trait GuildClient: Send + Sync {
    /// Guild every operation targets.
    fn guild_id(&self) -> GuildId;

    /// Fetches the names of the member's roles, fresh from Discord.
    ///
    /// Names are ordered as Discord lists the member's role ids.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Role names, possibly empty
    /// - `Err(DiscordError::MemberNotFound)` - User is not in the guild
    /// - `Err(DiscordError::Api)` - Discord request failed
    async fn member_role_names(&self, user_id: UserId) -> Result<Vec<String>, DiscordError>;

    /// Whether the user is a member of the guild.
    ///
    /// # Returns
    /// - `Ok(true)` - User is a guild member
    /// - `Ok(false)` - Discord does not know the user in this guild
    /// - `Err(DiscordError::Api)` - Discord request failed
    async fn has_member(&self, user_id: UserId) -> Result<bool, DiscordError>;

    /// Voice channel the member is currently connected to, if any.
    async fn member_voice_channel(&self, user_id: UserId)
        -> Result<Option<ChannelId>, DiscordError>;

    /// Creates a category channel and returns its id.
    async fn create_category(&self, name: &str) -> Result<ChannelId, DiscordError>;

    /// Creates a text or voice channel under `parent` and returns its id.
    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        parent: ChannelId,
    ) -> Result<ChannelId, DiscordError>;

    /// Returns the id of the role named `name`, creating it when missing.
    async fn find_or_create_role(
        &self,
        name: &str,
        colour: u32,
        reason: &str,
    ) -> Result<RoleId, DiscordError>;

    /// Adds a role to a guild member.
    async fn add_member_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), DiscordError>;
}

/// Realtime voice operations.
///
/// A guild holds at most one voice connection; callers serialize transitions
/// per guild (see `VoiceRegistry`).
#[async_trait]
pub trait VoiceTransport: Send + Sync {
    /// Connects the bot to `channel`, moving it if already connected elsewhere.
    async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), DiscordError>;

    /// Replaces whatever is playing with the audio at `url`.
    ///
    /// The returned receiver resolves once the track has finished or was stopped.
    async fn play(&self, guild_id: GuildId, url: &Url) -> Result<oneshot::Receiver<()>, DiscordError>;

    /// Disconnects from the guild's voice channel.
    async fn leave(&self, guild_id: GuildId) -> Result<(), DiscordError>;
}
