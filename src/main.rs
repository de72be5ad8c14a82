mod model;
mod server;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use serenity::all::GuildId;
use songbird::Songbird;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    bot::{self, handler::Handler},
    config::Config,
    error::{config::ConfigError, AppError},
    service::{
        discord::{guild::HttpGuildClient, voice::SongbirdTransport},
        policy::AdminAllowList,
        voice::VoiceRegistry,
    },
    startup,
    state::AppState,
};

const RATE_LIMIT_PERIOD_SECS: u64 = 60;
const RATE_LIMIT_BURST: u32 = 60;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let cors = startup::setup_cors(&config)?;

    let admins = Arc::new(AdminAllowList::new(config.admin_discord_ids.iter().copied()));
    tracing::info!("Loaded {} admin id(s)", admins.len());

    // Audio streams follow redirects, unlike the OAuth/REST client.
    let songbird = Songbird::serenity();
    let voice = VoiceRegistry::new(Arc::new(SongbirdTransport::new(
        songbird.clone(),
        reqwest::Client::new(),
    )));

    let guild_id = GuildId::new(config.discord_guild_id);
    let handler = Handler::new(
        db.clone(),
        voice.clone(),
        admins.clone(),
        config.action_timeout,
        guild_id,
    );
    let bot_client = bot::start::init_bot(&config, handler, songbird).await?;
    let guild = HttpGuildClient::new(bot_client.http.clone(), bot_client.cache.clone(), guild_id);

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let state = AppState {
        db,
        http_client,
        oauth_client,
        guild: Arc::new(guild),
        voice,
        admins,
        action_timeout: config.action_timeout,
        dashboard_url: config.dashboard_url.clone(),
    };

    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .period(Duration::from_secs(RATE_LIMIT_PERIOD_SECS))
            .burst_size(RATE_LIMIT_BURST)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or(ConfigError::RateLimit)?,
    );

    let router = server::router::router(state)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
