use tower_sessions::Session;

use crate::server::{
    error::{dispatch::DispatchError, AppError},
    middleware::session::AuthSession,
    model::identity::Identity,
};

/// Resolves the caller of an HTTP request to an authenticated identity.
///
/// Authorization is checked afterwards against the identity, so the same rules
/// apply to requests that never had a browser session (slash commands).
pub struct AuthGuard<'a> {
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Requires a logged-in identity.
    ///
    /// # Returns
    /// - `Ok(Identity)` - The identity stored at login
    /// - `Err(AppError::DispatchErr(DispatchError::Unauthenticated))` - Anonymous session
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn require_identity(&self) -> Result<Identity, AppError> {
        let Some(identity) = AuthSession::new(self.session).get_identity().await? else {
            return Err(DispatchError::Unauthenticated.into());
        };

        Ok(identity)
    }
}
