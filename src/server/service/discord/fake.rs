//! Recording fakes of the Discord interfaces.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    time::Duration,
};

use serenity::{
    all::{ChannelId, GuildId, RoleId, UserId},
    async_trait,
};
use tokio::sync::oneshot;
use url::Url;

use crate::server::{
    error::discord::DiscordError,
    model::action::ChannelKind,
    service::discord::{GuildClient, VoiceTransport},
};

pub const FAKE_GUILD_ID: u64 = 1_000;

/// Side-effecting guild call observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuildCall {
    CreateCategory(String),
    CreateChannel {
        name: String,
        kind: ChannelKind,
        parent: ChannelId,
    },
    FindOrCreateRole {
        name: String,
        colour: u32,
    },
    AddMemberRole {
        user_id: UserId,
        role_id: RoleId,
    },
}

#[derive(Default)]
pub struct FakeGuildClient {
    members: HashSet<UserId>,
    roles: HashMap<UserId, Vec<String>>,
    voice: HashMap<UserId, ChannelId>,
    fail_role_lookup: bool,
    fail_create: Option<String>,
    delay: Option<Duration>,
    role_lookups: AtomicU64,
    next_id: AtomicU64,
    calls: Mutex<Vec<GuildCall>>,
}

impl FakeGuildClient {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(500),
            ..Default::default()
        }
    }

    /// Registers a guild member without roles or voice presence.
    pub fn with_member(mut self, user_id: u64) -> Self {
        self.members.insert(UserId::new(user_id));
        self
    }

    pub fn with_roles(mut self, user_id: u64, roles: &[&str]) -> Self {
        self.roles.insert(
            UserId::new(user_id),
            roles.iter().map(|role| role.to_string()).collect(),
        );
        self
    }

    pub fn in_voice(mut self, user_id: u64, channel_id: u64) -> Self {
        self.voice
            .insert(UserId::new(user_id), ChannelId::new(channel_id));
        self
    }

    pub fn failing_role_lookup(mut self) -> Self {
        self.fail_role_lookup = true;
        self
    }

    /// Makes creation of the channel or category named `name` fail.
    pub fn failing_create(mut self, name: &str) -> Self {
        self.fail_create = Some(name.to_string());
        self
    }

    /// Delays every side-effecting call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<GuildCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn role_lookups(&self) -> u64 {
        self.role_lookups.load(Ordering::SeqCst)
    }

    async fn record(&self, call: GuildCall) -> Result<u64, DiscordError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failing = match (&call, &self.fail_create) {
            (GuildCall::CreateCategory(name), Some(fail)) => name == fail,
            (GuildCall::CreateChannel { name, .. }, Some(fail)) => name == fail,
            _ => false,
        };

        self.calls.lock().unwrap().push(call);

        if failing {
            return Err(serenity::Error::Other("Missing Permissions").into());
        }

        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl GuildClient for FakeGuildClient {
    fn guild_id(&self) -> GuildId {
        GuildId::new(FAKE_GUILD_ID)
    }

    async fn member_role_names(&self, user_id: UserId) -> Result<Vec<String>, DiscordError> {
        self.role_lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_role_lookup {
            return Err(DiscordError::MemberNotFound(user_id.get()));
        }

        Ok(self.roles.get(&user_id).cloned().unwrap_or_default())
    }

    async fn has_member(&self, user_id: UserId) -> Result<bool, DiscordError> {
        Ok(self.members.contains(&user_id)
            || self.roles.contains_key(&user_id)
            || self.voice.contains_key(&user_id))
    }

    async fn member_voice_channel(
        &self,
        user_id: UserId,
    ) -> Result<Option<ChannelId>, DiscordError> {
        Ok(self.voice.get(&user_id).copied())
    }

    async fn create_category(&self, name: &str) -> Result<ChannelId, DiscordError> {
        let id = self
            .record(GuildCall::CreateCategory(name.to_string()))
            .await?;
        Ok(ChannelId::new(id))
    }

    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        parent: ChannelId,
    ) -> Result<ChannelId, DiscordError> {
        let id = self
            .record(GuildCall::CreateChannel {
                name: name.to_string(),
                kind,
                parent,
            })
            .await?;
        Ok(ChannelId::new(id))
    }

    async fn find_or_create_role(
        &self,
        name: &str,
        colour: u32,
        _reason: &str,
    ) -> Result<RoleId, DiscordError> {
        let id = self
            .record(GuildCall::FindOrCreateRole {
                name: name.to_string(),
                colour,
            })
            .await?;
        Ok(RoleId::new(id))
    }

    async fn add_member_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        _reason: &str,
    ) -> Result<(), DiscordError> {
        self.record(GuildCall::AddMemberRole { user_id, role_id })
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCall {
    Join(GuildId, ChannelId),
    Play(GuildId, String),
    Leave(GuildId),
}

/// Voice transport that records calls and lets tests end tracks by hand.
#[derive(Default)]
pub struct FakeVoiceTransport {
    fail_join: bool,
    play_delay: Option<Duration>,
    calls: Mutex<Vec<VoiceCall>>,
    tracks: Mutex<Vec<Option<oneshot::Sender<()>>>>,
}

impl FakeVoiceTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_join(mut self) -> Self {
        self.fail_join = true;
        self
    }

    /// Delays `play` before the track is recorded as started.
    pub fn with_play_delay(mut self, delay: Duration) -> Self {
        self.play_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<VoiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Signals the end of the `index`-th track started on this transport.
    pub fn end_track(&self, index: usize) {
        if let Some(tx) = self.tracks.lock().unwrap()[index].take() {
            let _ = tx.send(());
        }
    }
}

#[async_trait]
impl VoiceTransport for FakeVoiceTransport {
    async fn join(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), DiscordError> {
        self.calls
            .lock()
            .unwrap()
            .push(VoiceCall::Join(guild_id, channel_id));

        if self.fail_join {
            return Err(DiscordError::Voice("gateway timed out".to_string()));
        }

        Ok(())
    }

    async fn play(
        &self,
        guild_id: GuildId,
        url: &Url,
    ) -> Result<oneshot::Receiver<()>, DiscordError> {
        if let Some(delay) = self.play_delay {
            tokio::time::sleep(delay).await;
        }

        self.calls
            .lock()
            .unwrap()
            .push(VoiceCall::Play(guild_id, url.to_string()));

        let (tx, rx) = oneshot::channel();
        self.tracks.lock().unwrap().push(Some(tx));

        Ok(rx)
    }

    async fn leave(&self, guild_id: GuildId) -> Result<(), DiscordError> {
        self.calls.lock().unwrap().push(VoiceCall::Leave(guild_id));
        Ok(())
    }
}
