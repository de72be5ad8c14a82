use axum::http::{header, HeaderValue, Method};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

/// Connects to the SQLite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions expire after 7 days of inactivity. The cookie is `SameSite=Lax` so
/// the redirect back from Discord still carries it.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer ready to wrap the router
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    Ok(session_layer(session_store))
}

/// Session layer over an already migrated store.
pub fn session_layer(session_store: SqliteStore) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)))
}

/// HTTP client for Discord's OAuth and REST endpoints.
///
/// Redirects are not followed so a crafted URL cannot bounce requests into the
/// internal network.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the Discord OAuth2 client.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with auth, token and redirect endpoints set
/// - `Err(AppError::ConfigErr)` - One of the configured URLs is invalid
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let auth_url = AuthUrl::new(config.discord_auth_url.clone()).map_err(|source| {
        ConfigError::InvalidUrl {
            name: "discord_auth_url".to_string(),
            source,
        }
    })?;
    let token_url = TokenUrl::new(config.discord_token_url.clone()).map_err(|source| {
        ConfigError::InvalidUrl {
            name: "discord_token_url".to_string(),
            source,
        }
    })?;
    let redirect_url = RedirectUrl::new(config.discord_redirect_url.clone()).map_err(|source| {
        ConfigError::InvalidUrl {
            name: "DISCORD_REDIRECT_URL".to_string(),
            source,
        }
    })?;

    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(client)
}

/// CORS for the dashboard origin, with credentials so the session cookie is sent.
///
/// Without a configured origin no cross-origin requests are allowed.
pub fn setup_cors(config: &Config) -> Result<CorsLayer, AppError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let Some(origin) = &config.cors_origin else {
        return Ok(cors);
    };

    let origin = HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidEnvVar {
        name: "CORS_ORIGIN".to_string(),
        value: origin.clone(),
    })?;

    Ok(cors.allow_origin(origin))
}
