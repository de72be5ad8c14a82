use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures of the Discord OAuth login flow.
#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The `state` query parameter does not match the token stored in the
    /// session when the login started, or no token was stored.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Discord rejected the authorization code exchange.
    #[error("Failed to exchange authorization code: {0}")]
    TokenExchange(String),

    /// Discord's `/users/@me` could not be fetched or parsed.
    #[error("Failed to fetch Discord profile: {0}")]
    ProfileFetch(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Login failures return 400 Bad Request, a failed profile fetch 502 Bad
/// Gateway; the body is always the same generic message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::ProfileFetch(_) => {
                tracing::error!("{}", self);
                StatusCode::BAD_GATEWAY
            }
            _ => {
                tracing::debug!("{}", self);
                StatusCode::BAD_REQUEST
            }
        };

        (
            status,
            Json(ErrorDto {
                error: "There was an issue logging you in, please try again.".to_string(),
            }),
        )
            .into_response()
    }
}
