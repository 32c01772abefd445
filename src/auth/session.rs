use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, Session, SessionManagerLayer};
use tracing::debug;

use crate::{config::SessionConfig, error::ApiError};

/// Key under which the authenticated user's id lives in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Cookie-keyed session layer; idle sessions expire after the configured TTL.
pub fn session_layer(cfg: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(cfg.cookie_name.clone())
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(cfg.secure_cookie)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(cfg.ttl_minutes)))
}

/// User bound to the session, `None` when nobody is logged in.
pub async fn current_user(session: &Session) -> Result<Option<i64>, ApiError> {
    session
        .get::<i64>(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("read session")))
}

/// Binds `user_id` under a fresh session id, discarding the one the client sent.
pub async fn establish(session: &Session, user_id: i64) -> Result<(), ApiError> {
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("cycle session id")))?;
    session
        .insert(SESSION_USER_ID_KEY, user_id)
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("write session")))?;
    debug!(user_id, "session established");
    Ok(())
}

pub async fn end(session: &Session) -> Result<(), ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("flush session")))
}
