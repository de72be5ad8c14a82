//! Discord bot: gateway connection, voice and the `/play` slash command.
//!
//! The bot is built during server startup, before the HTTP state, so its REST
//! client and cache can back the guild client the dashboard uses. It runs in a
//! separate tokio task.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and role data for the cache
//! - `GUILD_MESSAGES` - Messages in guild channels
//! - `GUILD_VOICE_STATES` - Voice states, needed to find the caller's channel
//!   and for Songbird to connect

pub mod handler;
pub mod start;
