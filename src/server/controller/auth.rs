use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, session::SessionDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::{AuthSession, CsrfSession},
        service::auth::DiscordAuthService,
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Query parameters for the OAuth callback endpoint.
///
/// # Fields
/// - `state` - CSRF protection token that must match the value stored in the session
/// - `code` - Authorization code used to exchange for access tokens
#[derive(Deserialize)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

#[utoipa::path(
    get,
    path = "/api/auth/discord",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord's authorize page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

#[utoipa::path(
    get,
    path = "/api/auth/discord/callback",
    tag = AUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state issued at login"),
        ("code" = String, Query, description = "Authorization code from Discord")
    ),
    responses(
        (status = 303, description = "Logged in, redirect to the dashboard"),
        (status = 400, description = "CSRF mismatch or rejected code", body = ErrorDto),
        (status = 502, description = "Discord profile could not be fetched", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(&state.db, &state.http_client, &state.oauth_client);

    validate_csrf(&session, &params.state).await?;

    let identity = auth_service.callback(params.code).await?;

    AuthSession::new(&session).set_identity(&identity).await?;

    Ok(Redirect::to(&state.dashboard_url))
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Session cleared, redirect to the dashboard")
    ),
)]
pub async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    AuthSession::new(&session).clear().await;

    Redirect::to(&state.dashboard_url)
}

/// Session info for the dashboard.
///
/// Never fails: anonymous callers and unreadable sessions both get
/// `{"discordId":null}`.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Identity of the session, or a null discordId", body = SessionDto)
    ),
)]
pub async fn get_session(session: Session) -> impl IntoResponse {
    let dto = match AuthSession::new(&session).get_identity().await {
        Ok(Some(identity)) => identity.into_dto(),
        Ok(None) => SessionDto::anonymous(),
        Err(err) => {
            tracing::warn!("Failed to read session, treating as anonymous: {}", err);
            SessionDto::anonymous()
        }
    };

    Json(dto)
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    if let Some(state) = stored_state {
        if state == csrf_state {
            return Ok(());
        }
    }

    Err(AppError::AuthErr(AuthError::CsrfValidationFailed))
}
