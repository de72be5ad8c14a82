//! Ready event handler.
//!
//! Fires once per gateway connection. Besides logging, it (re)registers the
//! guild's slash commands; registering replaces the full command set, so
//! reconnects are idempotent.

use serenity::all::{
    CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId, Ready,
};

/// Name of the playback slash command.
pub const PLAY_COMMAND: &str = "play";

/// Name of the URL option of [`PLAY_COMMAND`].
pub const PLAY_URL_OPTION: &str = "url";

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context used to register commands
/// - `ready` - Ready event data containing bot user information
/// - `guild_id` - Guild to register the commands in
pub async fn handle_ready(ctx: Context, ready: Ready, guild_id: GuildId) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    match guild_id.set_commands(&ctx.http, vec![play_command()]).await {
        Ok(commands) => tracing::info!(
            "Registered {} slash command(s) in guild {}",
            commands.len(),
            guild_id
        ),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }
}

fn play_command() -> CreateCommand {
    CreateCommand::new(PLAY_COMMAND)
        .description("Play a YouTube song in your voice channel")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                PLAY_URL_OPTION,
                "YouTube URL to play",
            )
            .required(true),
        )
}
