//! Session-gated Discord actions.
//!
//! Handlers authenticate before looking at the request body, so an anonymous
//! caller is rejected with 401 whatever it sent. A body that fails to parse is
//! reported as a validation error once the caller is known.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serenity::all::UserId;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ActionResultDto, ErrorDto},
        discord::{ActionLogListDto, AssignRoleDto, CreateStructureDto, PlayAudioDto},
        session::RolesDto,
    },
    server::{
        data::action_log::ActionLogRepository,
        error::{dispatch::DispatchError, AppError},
        middleware::{auth::AuthGuard, session::AuthSession},
        model::action::{ActionPayload, ActionRequest},
        state::AppState,
    },
};

pub static DISCORD_TAG: &str = "discord";

/// Number of entries returned by the action history endpoint.
const RECENT_ACTIONS_LIMIT: u64 = 20;

#[utoipa::path(
    post,
    path = "/api/discord/create-structure",
    tag = DISCORD_TAG,
    request_body = CreateStructureDto,
    responses(
        (status = 200, description = "Categories and channels created", body = ActionResultDto),
        (status = 400, description = "Invalid structure", body = ActionResultDto),
        (status = 401, description = "User not authenticated", body = ActionResultDto),
        (status = 403, description = "User is not an admin", body = ActionResultDto),
        (status = 500, description = "Discord rejected a request", body = ActionResultDto),
        (status = 504, description = "Discord did not respond in time", body = ActionResultDto)
    ),
)]
pub async fn create_structure(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<CreateStructureDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let requester = AuthGuard::new(&session).require_identity().await?;
    let Json(payload) = payload.map_err(invalid_body)?;

    state
        .dispatcher()
        .dispatch(ActionRequest::new(
            requester,
            ActionPayload::CreateStructure(payload),
        ))
        .await?;

    Ok(Json(ActionResultDto::succeeded()))
}

#[utoipa::path(
    post,
    path = "/api/discord/assign-role",
    tag = DISCORD_TAG,
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Verified role assigned", body = ActionResultDto),
        (status = 400, description = "Invalid Discord ID", body = ActionResultDto),
        (status = 401, description = "User not authenticated", body = ActionResultDto),
        (status = 403, description = "User is not an admin", body = ActionResultDto),
        (status = 500, description = "Discord rejected a request", body = ActionResultDto),
        (status = 504, description = "Discord did not respond in time", body = ActionResultDto)
    ),
)]
pub async fn assign_role(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<AssignRoleDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let requester = AuthGuard::new(&session).require_identity().await?;
    let Json(payload) = payload.map_err(invalid_body)?;

    state
        .dispatcher()
        .dispatch(ActionRequest::new(
            requester,
            ActionPayload::AssignRole(payload),
        ))
        .await?;

    Ok(Json(ActionResultDto::succeeded()))
}

#[utoipa::path(
    post,
    path = "/api/discord/play",
    tag = DISCORD_TAG,
    request_body = PlayAudioDto,
    responses(
        (status = 200, description = "Playback started", body = ActionResultDto),
        (status = 400, description = "Invalid URL or caller not in a voice channel", body = ActionResultDto),
        (status = 401, description = "User not authenticated", body = ActionResultDto),
        (status = 403, description = "User lacks the verified role", body = ActionResultDto),
        (status = 500, description = "Voice connection failed", body = ActionResultDto),
        (status = 504, description = "Discord did not respond in time", body = ActionResultDto)
    ),
)]
pub async fn play(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<PlayAudioDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let requester = AuthGuard::new(&session).require_identity().await?;
    let Json(payload) = payload.map_err(invalid_body)?;

    state
        .dispatcher()
        .dispatch(ActionRequest::new(
            requester,
            ActionPayload::PlayAudio(payload),
        ))
        .await?;

    Ok(Json(ActionResultDto::succeeded()))
}

/// Role names of the caller in the configured guild.
///
/// Never fails: anonymous callers and failed lookups get an empty list.
#[utoipa::path(
    get,
    path = "/api/discord/roles",
    tag = DISCORD_TAG,
    responses(
        (status = 200, description = "Role names of the caller, possibly empty", body = RolesDto)
    ),
)]
pub async fn get_roles(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let identity = match AuthSession::new(&session).get_identity().await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!("Failed to read session for role list: {}", err);
            None
        }
    };

    let roles = match identity {
        Some(identity) => state
            .guild
            .member_role_names(UserId::new(identity.discord_id))
            .await
            .unwrap_or_else(|err| {
                tracing::warn!("Role lookup for {} failed: {}", identity.discord_id, err);
                Vec::new()
            }),
        None => Vec::new(),
    };

    Json(RolesDto { roles })
}

/// The caller's most recent audited actions, newest first.
#[utoipa::path(
    get,
    path = "/api/discord/actions",
    tag = DISCORD_TAG,
    responses(
        (status = 200, description = "Recent actions of the caller", body = ActionLogListDto),
        (status = 401, description = "User not authenticated", body = ActionResultDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_actions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let requester = AuthGuard::new(&session).require_identity().await?;

    let actions = ActionLogRepository::new(&state.db)
        .get_recent_by_requester(requester.discord_id, RECENT_ACTIONS_LIMIT)
        .await?
        .into_iter()
        .map(|entry| entry.into_dto())
        .collect();

    Ok(Json(ActionLogListDto { actions }))
}

fn invalid_body(rejection: JsonRejection) -> DispatchError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());

    DispatchError::Validation("Invalid request body.".to_string())
}
