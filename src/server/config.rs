use std::{net::SocketAddr, time::Duration};

use crate::server::{
    error::{config::ConfigError, AppError},
    service::policy::DEFAULT_ADMIN_IDS,
};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_DASHBOARD_URL: &str = "/dashboard";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ACTION_TIMEOUT_SECS: u64 = 30;

pub struct Config {
    pub database_url: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    pub discord_bot_token: String,
    /// Guild every Discord action targets.
    pub discord_guild_id: u64,

    pub admin_discord_ids: Vec<u64>,

    /// Where the browser lands after login and logout.
    pub dashboard_url: String,
    pub cors_origin: Option<String>,
    pub bind_addr: SocketAddr,
    pub action_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parsable
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable could not be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let guild_id = required("DISCORD_GUILD_ID")?;
        let discord_guild_id = parse_id("DISCORD_GUILD_ID", &guild_id)?;

        let admin_discord_ids = match lookup("ADMIN_DISCORD_IDS") {
            Some(value) if !value.trim().is_empty() => value
                .split(',')
                .map(|id| parse_id("ADMIN_DISCORD_IDS", id))
                .collect::<Result<Vec<_>, _>>()?,
            _ => DEFAULT_ADMIN_IDS.to_vec(),
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR".to_string(),
                value: bind_addr.clone(),
            })?;

        let action_timeout = match lookup("ACTION_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidEnvVar {
                        name: "ACTION_TIMEOUT_SECS".to_string(),
                        value,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_ACTION_TIMEOUT_SECS),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_guild_id,
            admin_discord_ids,
            dashboard_url: lookup("WEB_DASHBOARD_URL")
                .unwrap_or_else(|| DEFAULT_DASHBOARD_URL.to_string()),
            cors_origin: lookup("CORS_ORIGIN"),
            bind_addr,
            action_timeout,
        })
    }
}

fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
