//! Session helpers.

use tower_sessions::Session;

use crate::error::ApiError;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user's id, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<String>, ApiError> {
    Ok(session.get::<String>(SESSION_USER_ID_KEY).await?)
}

/// Like [`current_user_id`], but an anonymous session is an error.
pub async fn require_user_id(session: &Session) -> Result<String, ApiError> {
    current_user_id(session).await?.ok_or(ApiError::NotAuthenticated)
}

/// Bind `user_id` to the session, rotating the session id first.
pub async fn start_session(session: &Session, user_id: &str) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user_id.to_string()).await?;
    Ok(())
}
