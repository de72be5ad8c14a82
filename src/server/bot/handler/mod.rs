use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, GuildId, Interaction, Ready};
use serenity::async_trait;
use std::sync::Arc;

use crate::server::service::{policy::AdminAllowList, voice::VoiceRegistry};

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub voice: VoiceRegistry,
    pub admins: Arc<AdminAllowList>,
    pub action_timeout: Duration,
    /// Guild the slash command is registered in.
    pub guild_id: GuildId,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        voice: VoiceRegistry,
        admins: Arc<AdminAllowList>,
        action_timeout: Duration,
        guild_id: GuildId,
    ) -> Self {
        Self {
            db,
            voice,
            admins,
            action_timeout,
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready, self.guild_id).await;
    }

    /// Called for slash commands and other interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(self, ctx, interaction).await;
    }
}
