use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument, warn};

use super::{
    dto::CreateRecipeRequest,
    repo::{self, NewRecipe, Recipe},
};
use crate::{
    auth::{extractors::AuthUser, repo_types::User},
    error::{ApiError, ApiJson},
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_recipes).post(create_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(|e| ApiError::from_store(e, format!("fetch user {user_id}")))?;
    let Some(user) = user else {
        warn!(user_id, "session points at a missing user");
        return Err(ApiError::Unauthorized);
    };

    let recipes = repo::list_by_user(&state.db, user.id)
        .await
        .map_err(|e| ApiError::from_store(e, format!("list recipes of user {user_id}")))?;
    Ok(Json(recipes))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let new = NewRecipe {
        title: &payload.title,
        instructions: &payload.instructions,
        minutes_to_complete: payload.minutes_to_complete,
        user_id,
    };
    let recipe = repo::create(&state.db, new)
        .await
        .map_err(|e| ApiError::from_store(e, format!("create recipe for user {user_id}")))?;

    info!(recipe_id = recipe.id, user_id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe)))
}
