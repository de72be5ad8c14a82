//! OAuth2 login with Discord

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use url::Url;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{identity::Identity, user::UpsertUserParam},
    state::OAuth2Client,
};

const DISCORD_PROFILE_URL: &str = "https://discord.com/api/users/@me";

/// Scopes requested from Discord during login.
pub const LOGIN_SCOPES: [&str; 3] = ["identify", "email", "guilds"];

/// Subset of Discord's `/users/@me` response the dashboard uses.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordProfile {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl DiscordProfile {
    /// Normalises the profile into user upsert parameters.
    ///
    /// # Returns
    /// - `Ok(UpsertUserParam)` - Profile carried a valid snowflake
    /// - `Err(AuthError::ProfileFetch)` - The id is not a non-zero snowflake
    pub fn into_param(self) -> Result<UpsertUserParam, AuthError> {
        let discord_id = match self.id.parse::<u64>() {
            Ok(id) if id != 0 => id,
            _ => {
                return Err(AuthError::ProfileFetch(format!(
                    "invalid user id '{}'",
                    self.id
                )))
            }
        };

        Ok(UpsertUserParam {
            discord_id,
            username: self.username,
            avatar: self.avatar,
            email: self.email,
        })
    }
}

pub struct DiscordAuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
        }
    }

    /// Builds Discord's authorize URL with a fresh CSRF token as `state`.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        LOGIN_SCOPES
            .iter()
            .fold(
                self.oauth_client.authorize_url(CsrfToken::new_random),
                |request, scope| request.add_scope(Scope::new(scope.to_string())),
            )
            .url()
    }

    /// Completes a login: exchanges the code, fetches the profile and records
    /// the user.
    ///
    /// The caller validates the CSRF state before calling this.
    ///
    /// # Returns
    /// - `Ok(Identity)` - Identity to store in the session
    /// - `Err(AppError::AuthErr)` - Code exchange or profile fetch failed
    /// - `Err(AppError::DbErr)` - User upsert failed
    pub async fn callback(&self, authorization_code: String) -> Result<Identity, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|err| AuthError::TokenExchange(err.to_string()))?;

        let profile = self.fetch_discord_profile(&token).await?;
        let user = UserRepository::new(self.db)
            .upsert(profile.into_param()?)
            .await?;

        tracing::info!("User {} ({}) logged in", user.username, user.discord_id);

        Ok(Identity::from(user))
    }

    /// Retrieves the Discord profile of the token's owner.
    async fn fetch_discord_profile(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordProfile, AuthError> {
        let access_token = token.access_token().secret();

        self.http_client
            .get(DISCORD_PROFILE_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| AuthError::ProfileFetch(err.to_string()))?
            .json::<DiscordProfile>()
            .await
            .map_err(|err| AuthError::ProfileFetch(err.to_string()))
    }
}
