//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but only exposes the keys of
//! its own concern:
//! - `AuthSession` - The authenticated `Identity`
//! - `CsrfSession` - CSRF token of a pending OAuth login

use tower_sessions::Session;

use crate::server::{error::AppError, model::identity::Identity};

const SESSION_AUTH_IDENTITY: &str = "auth:identity";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
///
/// The identity is written once per login and replaced wholesale on the next
/// one; it is never partially updated.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    /// Creates a new AuthSession wrapper.
    ///
    /// # Arguments
    /// - `session` - Reference to the tower-sessions Session to wrap
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Establishes a logged-in session for the identity.
    ///
    /// Cycles the session id first so an id issued before login cannot be
    /// reused after it.
    ///
    /// # Returns
    /// - `Ok(())` - Identity stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write the session
    pub async fn set_identity(&self, identity: &Identity) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_AUTH_IDENTITY, identity)
            .await?;
        Ok(())
    }

    /// Retrieves the identity of the logged-in user.
    ///
    /// # Returns
    /// - `Ok(Some(identity))` - User is logged in
    /// - `Ok(None)` - Anonymous session
    /// - `Err(AppError::SessionErr(_))` - Failed to read the session
    pub async fn get_identity(&self) -> Result<Option<Identity>, AppError> {
        Ok(self.session.get::<Identity>(SESSION_AUTH_IDENTITY).await?)
    }

    /// Clears all data from the session.
    ///
    /// Used during logout; also drops any pending CSRF token.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management for the OAuth flow.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the CSRF token sent to Discord as the OAuth `state` parameter.
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token.
    ///
    /// A token can only be consumed once, so a replayed callback fails validation.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - A login was pending
    /// - `Ok(None)` - No login was started in this session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?)
    }
}
