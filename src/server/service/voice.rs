//! Per-guild voice connection registry.
//!
//! Each guild owns one slot guarded by an async mutex, so a join, a track swap
//! and the leave after a track ends never interleave for the same guild.
//! Different guilds do not contend.

use std::{collections::HashMap, sync::Arc};

use serenity::all::{ChannelId, GuildId};
use tokio::sync::Mutex;
use url::Url;

use crate::server::{error::discord::DiscordError, service::discord::VoiceTransport};

#[derive(Debug, Default)]
struct VoiceSlot {
    /// Channel the bot is connected to in this guild.
    channel: Option<ChannelId>,
    /// Incremented on every started track; a track-end signal only leaves
    /// the channel while its generation is still current.
    generation: u64,
}

/// Registry of voice connections keyed by guild id.
///
/// Cheap to clone; clones share the slots.
#[derive(Clone)]
pub struct VoiceRegistry {
    transport: Arc<dyn VoiceTransport>,
    slots: Arc<Mutex<HashMap<GuildId, Arc<Mutex<VoiceSlot>>>>>,
}

impl VoiceRegistry {
    pub fn new(transport: Arc<dyn VoiceTransport>) -> Self {
        Self {
            transport,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn slot(&self, guild_id: GuildId) -> Arc<Mutex<VoiceSlot>> {
        let mut slots = self.slots.lock().await;

        slots.entry(guild_id).or_default().clone()
    }

    /// Plays `url` in `channel_id`, replacing any current track in the guild.
    ///
    /// Joins the channel first unless the bot is already connected to it. Once
    /// the track ends the bot leaves, unless another play has started since.
    ///
    /// The transition runs on its own task, so dropping the returned future
    /// (a dispatcher timeout) cannot leave the slot half updated.
    ///
    /// # Returns
    /// - `Ok(())` - Playback started
    /// - `Err(DiscordError::Voice)` - Joining or starting playback failed; the
    ///   guild is left disconnected
    pub async fn play(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        url: &Url,
    ) -> Result<(), DiscordError> {
        let registry = self.clone();
        let url = url.clone();

        tokio::spawn(async move { registry.transition(guild_id, channel_id, &url).await })
            .await
            .map_err(|err| DiscordError::Voice(format!("voice task failed: {}", err)))?
    }

    async fn transition(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        url: &Url,
    ) -> Result<(), DiscordError> {
        let slot = self.slot(guild_id).await;
        let mut state = slot.lock().await;

        if state.channel != Some(channel_id) {
            if let Err(err) = self.transport.join(guild_id, channel_id).await {
                self.disconnect(guild_id, &mut state).await;
                return Err(err);
            }
            state.channel = Some(channel_id);
        }

        let ended = match self.transport.play(guild_id, url).await {
            Ok(ended) => ended,
            Err(err) => {
                self.disconnect(guild_id, &mut state).await;
                return Err(err);
            }
        };

        state.generation += 1;
        let generation = state.generation;
        drop(state);

        tracing::debug!(
            "Started track {} in guild {} channel {}",
            generation,
            guild_id,
            channel_id
        );

        let registry = self.clone();
        tokio::spawn(async move {
            // A dropped sender means the connection went away with the track.
            let _ = ended.await;
            registry.leave_if_current(guild_id, generation).await;
        });

        Ok(())
    }

    /// Leaves the guild's channel if no newer track has started.
    async fn leave_if_current(&self, guild_id: GuildId, generation: u64) {
        let slot = self.slot(guild_id).await;
        let mut state = slot.lock().await;

        if state.generation != generation || state.channel.is_none() {
            return;
        }

        self.disconnect(guild_id, &mut state).await;
    }

    async fn disconnect(&self, guild_id: GuildId, state: &mut VoiceSlot) {
        state.channel = None;

        if let Err(err) = self.transport.leave(guild_id).await {
            tracing::warn!("Failed to leave voice in guild {}: {}", guild_id, err);
        }
    }
}
