use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};
use songbird::{SerenityInit, Songbird};

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord client with the voice manager registered.
///
/// The client is returned unstarted so its HTTP client and cache can be shared
/// before the gateway connection is opened with [`start_bot`].
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `handler` - Event handler for ready and interaction events
/// - `songbird` - Voice manager shared with the HTTP side
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError::DiscordErr)` - Client could not be built
pub async fn init_bot(
    config: &Config,
    handler: Handler,
    songbird: Arc<Songbird>,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_VOICE_STATES;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .register_songbird_with(songbird)
        .await?;

    Ok(client)
}

/// Connects the bot to the gateway; resolves only when the connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
