use std::sync::Arc;

use serenity::{
    all::{ChannelId, GuildId},
    async_trait,
};
use songbird::{
    input::YoutubeDl, Event, EventContext, EventHandler as VoiceEventHandler, Songbird,
    TrackEvent,
};
use tokio::sync::{oneshot, Mutex};
use url::Url;

use crate::server::{error::discord::DiscordError, service::discord::VoiceTransport};

/// `VoiceTransport` backed by songbird, streaming audio resolved through yt-dlp.
pub struct SongbirdTransport {
    manager: Arc<Songbird>,
    http_client: reqwest::Client,
}

impl SongbirdTransport {
    /// # Arguments
    /// - `manager` - Songbird instance registered with the serenity client
    /// - `http_client` - Client used to fetch the resolved audio stream
    pub fn new(manager: Arc<Songbird>, http_client: reqwest::Client) -> Self {
        Self {
            manager,
            http_client,
        }
    }
}

#[async_trait]
impl VoiceTransport for SongbirdTransport {
    async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), DiscordError> {
        self.manager
            .join(guild_id, channel_id)
            .await
            .map_err(|err| DiscordError::Voice(format!("join {}: {}", channel_id, err)))?;

        Ok(())
    }

    async fn play(
        &self,
        guild_id: GuildId,
        url: &Url,
    ) -> Result<oneshot::Receiver<()>, DiscordError> {
        let Some(call) = self.manager.get(guild_id) else {
            return Err(DiscordError::Voice(format!(
                "no voice connection in guild {}",
                guild_id
            )));
        };

        let source = YoutubeDl::new(self.http_client.clone(), url.to_string());

        let mut handler = call.lock().await;
        handler.stop();
        let track = handler.play_input(source.into());

        let (tx, rx) = oneshot::channel();
        track
            .add_event(Event::Track(TrackEvent::End), TrackEndNotifier::new(tx))
            .map_err(|err| DiscordError::Voice(format!("track events: {}", err)))?;

        Ok(rx)
    }

    async fn leave(&self, guild_id: GuildId) -> Result<(), DiscordError> {
        self.manager
            .remove(guild_id)
            .await
            .map_err(|err| DiscordError::Voice(format!("leave: {}", err)))
    }
}

/// Fires once when the track ends, then unregisters itself.
struct TrackEndNotifier {
    tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl TrackEndNotifier {
    fn new(tx: oneshot::Sender<()>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }
}

#[async_trait]
impl VoiceEventHandler for TrackEndNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        if let Some(tx) = self.tx.lock().await.take() {
            let _ = tx.send(());
        }

        Some(Event::Cancel)
    }
}
