use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ActionResultDto, server::error::discord::DiscordError};

/// Outcome kinds of a dispatched action that did not succeed.
///
/// Every variant renders as `{"success":false,"error":...}` with a curated
/// message; raw adapter faults are logged server-side only.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No identity in the caller's session.
    #[error("No authenticated identity in session")]
    Unauthenticated,

    /// The identity lacks the privilege the action requires.
    #[error("{0}")]
    Forbidden(String),

    /// The action payload is malformed.
    #[error("{0}")]
    Validation(String),

    /// Playback was requested by a member who is not connected to voice.
    #[error("You must be in a voice channel to play music.")]
    NotInVoiceChannel,

    /// The adapter call exceeded the configured action timeout.
    #[error("Action timed out after {0} seconds")]
    Timeout(u64),

    /// The Discord adapter failed while executing the action.
    #[error(transparent)]
    External(#[from] DiscordError),
}

impl DispatchError {
    /// HTTP status for the error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::NotInVoiceChannel => StatusCode::BAD_REQUEST,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::External(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthenticated => "Unauthorized".to_string(),
            Self::Timeout(_) => "Discord did not respond in time, please try again.".to_string(),
            Self::External(err) => err.public_message().to_string(),
            err => err.to_string(),
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        if let Self::External(err) = &self {
            tracing::error!("Discord action failed: {}", err);
        }

        (
            self.status(),
            Json(ActionResultDto::failed(self.public_message())),
        )
            .into_response()
    }
}
