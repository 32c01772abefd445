use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, SignupRequest},
        password::{hash_password_blocking, verify_password_blocking},
        repo_types::{NewUser, User},
        session::{current_user, end, establish},
    },
    error::{ApiError, ApiJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/check_session", get(check_session))
        .route("/logout", delete(logout))
}

#[instrument(skip(state, session, payload))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.password.is_empty() {
        warn!(username = %payload.username, "signup with empty password");
        return Err(ApiError::Unprocessable);
    }

    let hash = hash_password_blocking(payload.password).await?;

    let new = NewUser {
        username: &payload.username,
        password_hash: &hash,
        image_url: payload.image_url.as_deref(),
        bio: payload.bio.as_deref(),
    };
    let user = User::create(&state.db, new)
        .await
        .map_err(|e| ApiError::from_store(e, format!("create user {}", payload.username)))?;

    establish(&session, user.id).await?;
    info!(user_id = user.id, username = %user.username, "user signed up");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = User::find_by_username(&state.db, &payload.username)
        .await
        .map_err(|e| ApiError::from_store(e, "find user by username"))?;

    // Unknown user and wrong password answer identically.
    let Some(user) = user else {
        warn!(username = %payload.username, "login unknown username");
        return Err(ApiError::Unauthorized);
    };

    if !verify_password_blocking(payload.password, user.password_hash.clone()).await? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized);
    }

    establish(&session, user.id).await?;
    info!(user_id = user.id, "user logged in");
    Ok(Json(user))
}

#[instrument(skip(state, session))]
pub async fn check_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, ApiError> {
    let Some(user_id) = current_user(&session).await? else {
        return Ok(no_session());
    };

    match User::find_by_id(&state.db, user_id).await {
        Ok(Some(user)) => Ok(Json(user).into_response()),
        Ok(None) => {
            warn!(user_id, "session points at a missing user");
            Ok(no_session())
        }
        Err(e) => Err(ApiError::from_store(e, format!("fetch user {user_id}"))),
    }
}

/// Always succeeds, whether or not a session existed.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode, ApiError> {
    if let Some(user_id) = current_user(&session).await? {
        info!(user_id, "user logged out");
    }
    end(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn no_session() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({}))).into_response()
}
