//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by controllers. It wraps the
//! domain errors and implements `IntoResponse`, so handlers can use `?` and let
//! each error decide its own status code and body.

pub mod auth;
pub mod config;
pub mod discord;
pub mod dispatch;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, discord::DiscordError, dispatch::DispatchError,
        internal::InternalError,
    },
};

/// Top-level application error type.
///
/// Most variants convert automatically with `#[from]`. `AuthErr` and
/// `DispatchErr` render their own responses; everything else becomes a 500
/// with a generic body and the details logged.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// OAuth login flow error.
    ///
    /// Delegates to `AuthError::into_response()`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Failure of a session-gated action (401/403/400/500/504).
    ///
    /// Delegates to `DispatchError::into_response()`.
    #[error(transparent)]
    DispatchErr(#[from] DispatchError),

    /// Discord API error outside the dispatcher (bot startup, command registration).
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx database driver error, raised while preparing the session table.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Socket bind or serve error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Unexpected internal state, see `InternalError`.
    #[error(transparent)]
    InternalErr(#[from] InternalError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep `AppError` small.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Adapter faults reaching a controller outside a dispatch go through the
/// dispatcher's curated envelope as well.
impl From<DiscordError> for AppError {
    fn from(err: DiscordError) -> Self {
        AppError::DispatchErr(DispatchError::External(err))
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - Variable - For `AuthErr` and `DispatchErr`, delegated to their own mapping
/// - 500 Internal Server Error - For all other variants
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::DispatchErr(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error and returns a generic body to avoid leaking details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
