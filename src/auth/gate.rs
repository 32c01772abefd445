use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tower_sessions::Session;
use tracing::warn;

use super::{extractors::AuthUser, session::current_user};
use crate::{error::ApiError, state::AppState};

/// Authentication requirement attached to a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Open,
    Authenticated,
}

/// Registers `routes` under the given access level. Authenticated routes only
/// reach their handler once `require_session` resolved a user.
pub fn with_access(routes: Router<AppState>, access: Access) -> Router<AppState> {
    match access {
        Access::Open => routes,
        Access::Authenticated => routes.route_layer(middleware::from_fn(require_session)),
    }
}

pub async fn require_session(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(user_id) = current_user(&session).await? else {
        warn!(path = %req.uri().path(), "no session, or session expired or logged out");
        return Err(ApiError::Unauthorized);
    };
    req.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(req).await)
}
