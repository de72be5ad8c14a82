//! Command dispatcher for privileged Discord actions.
//!
//! Every action runs the same sequence: authorize the requester for the action
//! kind, validate the payload, invoke exactly one adapter under the action
//! timeout, then record the outcome in the action log. A request that fails a
//! step never reaches the next one, so a denied requester causes no side
//! effects.
//!
//! Authentication happens before the dispatcher is involved: HTTP controllers
//! resolve the session through `AuthGuard`, the bot builds the identity from the
//! interaction's user.

use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, UserId};

use crate::server::{
    data::action_log::ActionLogRepository,
    error::dispatch::DispatchError,
    model::{
        action::{ActionKind, ActionRequest, CategoryPlan, ValidatedAction},
        action_log::{ActionOutcome, CreateActionLogParam},
        identity::Identity,
    },
    service::{
        discord::GuildClient,
        policy::{self, AdminAllowList, VERIFIED_ROLE_NAME},
        voice::VoiceRegistry,
    },
};

/// Colour of the verified role when it has to be created.
pub const VERIFIED_ROLE_COLOUR: u32 = 0x00FF00;

/// Audit log reason attached to verified role changes.
pub const VERIFIED_ROLE_REASON: &str = "Verified users from the site";

/// Result of a successfully executed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    Completed,
    /// Playback started in the requester's voice channel.
    Playing { channel_id: ChannelId },
}

/// What authorization established about the requester.
struct Grant {
    /// Voice channel of the requester, only resolved for playback.
    voice_channel: Option<ChannelId>,
}

pub struct CommandDispatcher<'a> {
    db: &'a DatabaseConnection,
    guild: &'a dyn GuildClient,
    voice: &'a VoiceRegistry,
    admins: &'a AdminAllowList,
    timeout: Duration,
}

impl<'a> CommandDispatcher<'a> {
    /// # Arguments
    /// - `db` - Connection used for the action log
    /// - `guild` - Guild operations of the configured guild
    /// - `voice` - Voice connection registry
    /// - `admins` - Admin allow-list built at startup
    /// - `timeout` - Upper bound for a single adapter invocation
    pub fn new(
        db: &'a DatabaseConnection,
        guild: &'a dyn GuildClient,
        voice: &'a VoiceRegistry,
        admins: &'a AdminAllowList,
        timeout: Duration,
    ) -> Self {
        Self {
            db,
            guild,
            voice,
            admins,
            timeout,
        }
    }

    /// Runs an action request through authorization, validation and execution.
    ///
    /// # Returns
    /// - `Ok(ActionOutput)` - The adapter completed
    /// - `Err(DispatchError::Forbidden)` - Requester lacks the privilege for the kind
    /// - `Err(DispatchError::NotInVoiceChannel)` - Playback requested outside voice
    /// - `Err(DispatchError::Validation)` - Payload rejected
    /// - `Err(DispatchError::Timeout)` - Adapter exceeded the action timeout
    /// - `Err(DispatchError::External)` - Adapter failed
    pub async fn dispatch(&self, request: ActionRequest) -> Result<ActionOutput, DispatchError> {
        let ActionRequest { requester, payload } = request;
        let kind = payload.kind();

        let result = async {
            let grant = self.authorize(&requester, kind).await?;
            let action = payload.validate()?;
            self.execute_with_timeout(action, grant).await
        }
        .await;

        self.audit(&requester, kind, &result).await;

        result
    }

    async fn authorize(&self, requester: &Identity, kind: ActionKind) -> Result<Grant, DispatchError> {
        match kind {
            ActionKind::CreateStructure | ActionKind::AssignRole => {
                if !self.admins.is_admin(requester) {
                    tracing::info!(
                        "Denied {} for {}: not an admin",
                        kind.as_str(),
                        requester.discord_id
                    );
                    return Err(DispatchError::Forbidden(
                        "You do not have permission to perform this action.".to_string(),
                    ));
                }

                Ok(Grant {
                    voice_channel: None,
                })
            }
            ActionKind::PlayAudio => {
                if !policy::is_verified(self.guild, requester).await {
                    tracing::info!(
                        "Denied {} for {}: missing verified role",
                        kind.as_str(),
                        requester.discord_id
                    );
                    return Err(DispatchError::Forbidden(format!(
                        "You need the {} role to use this command.",
                        VERIFIED_ROLE_NAME
                    )));
                }

                let channel = self
                    .guild
                    .member_voice_channel(UserId::new(requester.discord_id))
                    .await?;

                match channel {
                    Some(channel_id) => Ok(Grant {
                        voice_channel: Some(channel_id),
                    }),
                    None => Err(DispatchError::NotInVoiceChannel),
                }
            }
        }
    }

    async fn execute_with_timeout(
        &self,
        action: ValidatedAction,
        grant: Grant,
    ) -> Result<ActionOutput, DispatchError> {
        match tokio::time::timeout(self.timeout, self.execute(action, grant)).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout(self.timeout.as_secs())),
        }
    }

    async fn execute(
        &self,
        action: ValidatedAction,
        grant: Grant,
    ) -> Result<ActionOutput, DispatchError> {
        match action {
            ValidatedAction::CreateStructure(categories) => {
                self.create_structure(&categories).await?;
                Ok(ActionOutput::Completed)
            }
            ValidatedAction::AssignRole { target_id } => {
                let target = UserId::new(target_id);

                if !self.guild.has_member(target).await? {
                    return Err(DispatchError::Validation(
                        "That user is not a member of the Discord server.".to_string(),
                    ));
                }

                let role_id = self
                    .guild
                    .find_or_create_role(
                        VERIFIED_ROLE_NAME,
                        VERIFIED_ROLE_COLOUR,
                        VERIFIED_ROLE_REASON,
                    )
                    .await?;

                self.guild
                    .add_member_role(target, role_id, VERIFIED_ROLE_REASON)
                    .await?;

                Ok(ActionOutput::Completed)
            }
            ValidatedAction::PlayAudio { url } => {
                let channel_id = grant
                    .voice_channel
                    .ok_or(DispatchError::NotInVoiceChannel)?;

                self.voice
                    .play(self.guild.guild_id(), channel_id, &url)
                    .await?;

                Ok(ActionOutput::Playing { channel_id })
            }
        }
    }

    /// Creates categories and their channels in payload order.
    ///
    /// Stops at the first failure; anything created before it stays.
    async fn create_structure(
        &self,
        categories: &[CategoryPlan],
    ) -> Result<(), DispatchError> {
        for category in categories {
            let parent = self.guild.create_category(&category.name).await?;

            for channel in &category.channels {
                self.guild
                    .create_channel(&channel.name, channel.kind, parent)
                    .await?;
            }
        }

        Ok(())
    }

    /// Records the outcome; a failed write is logged and otherwise ignored.
    async fn audit(
        &self,
        requester: &Identity,
        kind: ActionKind,
        result: &Result<ActionOutput, DispatchError>,
    ) {
        let (outcome, detail) = match result {
            Ok(_) => (ActionOutcome::Succeeded, None),
            Err(err) => {
                let outcome = match err {
                    DispatchError::Forbidden(_) | DispatchError::Unauthenticated => {
                        ActionOutcome::Forbidden
                    }
                    DispatchError::Validation(_) | DispatchError::NotInVoiceChannel => {
                        ActionOutcome::Invalid
                    }
                    DispatchError::Timeout(_) | DispatchError::External(_) => {
                        ActionOutcome::Failed
                    }
                };
                (outcome, Some(err.public_message()))
            }
        };

        let param = CreateActionLogParam {
            requester_id: requester.discord_id,
            kind,
            outcome,
            detail,
        };

        if let Err(err) = ActionLogRepository::new(self.db).create(param).await {
            tracing::error!(
                "Failed to record {} by {}: {}",
                kind.as_str(),
                requester.discord_id,
                err
            );
        }
    }
}
