//! Slash command handling.
//!
//! `/play` runs through the same dispatcher as the dashboard's play endpoint;
//! the invoking user takes the place of the session identity.
//!
//! The interaction is deferred before dispatching, since joining voice can take
//! longer than Discord's initial response window. A success replaces the
//! deferred message; an error removes it and follows up ephemerally.

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse, Interaction, User,
};

use crate::{
    model::discord::PlayAudioDto,
    server::{
        bot::handler::{
            ready::{PLAY_COMMAND, PLAY_URL_OPTION},
            Handler,
        },
        data::user::UserRepository,
        error::dispatch::DispatchError,
        model::{
            action::{ActionPayload, ActionRequest},
            identity::Identity,
        },
        service::{
            discord::guild::HttpGuildClient,
            dispatch::{ActionOutput, CommandDispatcher},
        },
    },
};

/// Handles interactions; anything other than `/play` is ignored.
pub async fn handle_interaction_create(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if command.data.name != PLAY_COMMAND {
        tracing::debug!("Ignoring unknown command /{}", command.data.name);
        return;
    }

    if let Err(e) = command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await
    {
        tracing::error!("Failed to defer /{}: {:?}", PLAY_COMMAND, e);
        return;
    }

    let guild = HttpGuildClient::new(ctx.http.clone(), ctx.cache.clone(), handler.guild_id);
    let dispatcher = CommandDispatcher::new(
        &handler.db,
        &guild,
        &handler.voice,
        &handler.admins,
        handler.action_timeout,
    );

    let requester = resolve_identity(handler, &command.user).await;
    let request = ActionRequest::new(
        requester,
        ActionPayload::PlayAudio(PlayAudioDto {
            youtube_url: url_option(&command),
        }),
    );

    let result = match reply_for(dispatcher.dispatch(request).await) {
        Reply::Public(content) => command
            .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
            .await
            .map(|_| ()),
        Reply::Ephemeral(content) => {
            if let Err(e) = command.delete_response(&ctx.http).await {
                tracing::warn!("Failed to remove deferred /{} reply: {:?}", PLAY_COMMAND, e);
            }

            command
                .create_followup(
                    &ctx.http,
                    CreateInteractionResponseFollowup::new()
                        .content(content)
                        .ephemeral(true),
                )
                .await
                .map(|_| ())
        }
    };

    if let Err(e) = result {
        tracing::error!("Failed to respond to /{}: {:?}", PLAY_COMMAND, e);
    }
}

/// Identity of the invoking user.
///
/// Prefers the record stored at dashboard login, which carries the email; a
/// user who never logged in, or a failed lookup, falls back to the interaction
/// user.
async fn resolve_identity(handler: &Handler, user: &User) -> Identity {
    match UserRepository::new(&handler.db)
        .find_by_discord_id(user.id.get())
        .await
    {
        Ok(Some(stored)) => Identity::from(stored),
        Ok(None) => identity_from_user(user),
        Err(e) => {
            tracing::warn!("Failed to load user {}: {}", user.id, e);
            identity_from_user(user)
        }
    }
}

/// Identity built from interaction data alone; the bot never sees an email.
fn identity_from_user(user: &User) -> Identity {
    Identity {
        discord_id: user.id.get(),
        username: user.name.clone(),
        avatar: user.avatar.map(|hash| hash.to_string()),
        email: None,
    }
}

fn url_option(command: &CommandInteraction) -> String {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == PLAY_URL_OPTION)
        .and_then(|option| option.value.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Reply to a dispatched `/play`.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    /// Visible to the channel.
    Public(String),
    /// Visible to the invoking user only.
    Ephemeral(String),
}

/// Public confirmation on success, ephemeral curated error otherwise.
fn reply_for(result: Result<ActionOutput, DispatchError>) -> Reply {
    match result {
        Ok(ActionOutput::Playing { channel_id }) => {
            Reply::Public(format!("Playing your song in <#{}>!", channel_id))
        }
        Ok(ActionOutput::Completed) => Reply::Public("Done!".to_string()),
        Err(err) => {
            if let DispatchError::External(e) = &err {
                tracing::error!("/{} failed: {}", PLAY_COMMAND, e);
            }

            Reply::Ephemeral(err.public_message())
        }
    }
}
