use std::sync::Arc;

use serenity::{
    all::{
        Cache, ChannelId, ChannelType, CreateChannel, EditRole, GuildId, Http, Member, Role,
        RoleId, UserId,
    },
    async_trait,
};

use crate::server::{
    error::discord::DiscordError, model::action::ChannelKind,
    service::discord::GuildClient,
};

/// `GuildClient` backed by serenity's REST client and gateway cache.
///
/// Role lookups always hit the REST API so a role removed a moment ago is not
/// honoured from a stale cache. Voice presence comes from the cache, which the
/// gateway keeps current through voice state updates.
pub struct HttpGuildClient {
    http: Arc<Http>,
    cache: Arc<Cache>,
    guild_id: GuildId,
}

impl HttpGuildClient {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>, guild_id: GuildId) -> Self {
        Self {
            http,
            cache,
            guild_id,
        }
    }

    async fn create(&self, builder: CreateChannel<'_>) -> Result<ChannelId, DiscordError> {
        let channel = self.guild_id.create_channel(&self.http, builder).await?;

        Ok(channel.id)
    }
}

#[async_trait]
impl GuildClient for HttpGuildClient {
    fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    async fn member_role_names(&self, user_id: UserId) -> Result<Vec<String>, DiscordError> {
        let member = self
            .http
            .get_member(self.guild_id, user_id)
            .await
            .map_err(|err| {
                if is_not_found(&err) {
                    DiscordError::MemberNotFound(user_id.get())
                } else {
                    DiscordError::from(err)
                }
            })?;

        let roles = self.http.get_guild_roles(self.guild_id).await?;

        Ok(role_names(&member, &roles))
    }

    async fn has_member(&self, user_id: UserId) -> Result<bool, DiscordError> {
        match self.http.get_member(self.guild_id, user_id).await {
            Ok(_) => Ok(true),
            Err(err) if is_not_found(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn member_voice_channel(
        &self,
        user_id: UserId,
    ) -> Result<Option<ChannelId>, DiscordError> {
        let channel_id = self.cache.guild(self.guild_id).and_then(|guild| {
            guild
                .voice_states
                .get(&user_id)
                .and_then(|state| state.channel_id)
        });

        Ok(channel_id)
    }

    async fn create_category(&self, name: &str) -> Result<ChannelId, DiscordError> {
        self.create(CreateChannel::new(name).kind(ChannelType::Category))
            .await
    }

    async fn create_channel(
        &self,
        name: &str,
        kind: ChannelKind,
        parent: ChannelId,
    ) -> Result<ChannelId, DiscordError> {
        let channel_type = match kind {
            ChannelKind::Text => ChannelType::Text,
            ChannelKind::Voice => ChannelType::Voice,
        };

        self.create(
            CreateChannel::new(name)
                .kind(channel_type)
                .category(parent),
        )
        .await
    }

    async fn find_or_create_role(
        &self,
        name: &str,
        colour: u32,
        reason: &str,
    ) -> Result<RoleId, DiscordError> {
        let roles = self.http.get_guild_roles(self.guild_id).await?;

        if let Some(role) = roles.iter().find(|role| role.name == name) {
            return Ok(role.id);
        }

        tracing::info!("Creating missing role '{}' in guild {}", name, self.guild_id);

        let role = self
            .guild_id
            .create_role(
                &self.http,
                EditRole::new()
                    .name(name)
                    .colour(colour)
                    .audit_log_reason(reason),
            )
            .await?;

        Ok(role.id)
    }

    async fn add_member_role(
        &self,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), DiscordError> {
        self.http
            .add_member_role(self.guild_id, user_id, role_id, Some(reason))
            .await
            .map_err(|err| {
                if is_not_found(&err) {
                    DiscordError::MemberNotFound(user_id.get())
                } else {
                    DiscordError::from(err)
                }
            })
    }
}

/// Resolves a member's role ids to names, keeping the member's order.
///
/// Ids without a matching guild role (deleted since the member was fetched)
/// are skipped.
fn role_names(member: &Member, roles: &[Role]) -> Vec<String> {
    member
        .roles
        .iter()
        .filter_map(|role_id| roles.iter().find(|role| role.id == *role_id))
        .map(|role| role.name.clone())
        .collect()
}

fn is_not_found(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http_err) => http_err
            .status_code()
            .is_some_and(|status| status.as_u16() == 404),
        _ => false,
    }
}
