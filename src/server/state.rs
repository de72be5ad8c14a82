//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned for each request
//! through Axum's state extraction. Every field is cheap to clone.

use std::{sync::Arc, time::Duration};

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::service::{
    discord::GuildClient, dispatch::CommandDispatcher, policy::AdminAllowList,
    voice::VoiceRegistry,
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for users, the action log and sessions.
    pub db: DatabaseConnection,

    /// HTTP client for Discord's OAuth and REST endpoints.
    ///
    /// Configured not to follow redirects.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// Guild operations on the configured guild.
    pub guild: Arc<dyn GuildClient>,

    pub voice: VoiceRegistry,

    /// Admin allow-list built once at startup.
    pub admins: Arc<AdminAllowList>,

    /// Upper bound for a single Discord action.
    pub action_timeout: Duration,

    /// Where the browser is redirected after login and logout.
    pub dashboard_url: String,
}

impl AppState {
    /// Dispatcher bound to this state's collaborators.
    pub fn dispatcher(&self) -> CommandDispatcher<'_> {
        CommandDispatcher::new(
            &self.db,
            self.guild.as_ref(),
            &self.voice,
            &self.admins,
            self.action_timeout,
        )
    }
}
