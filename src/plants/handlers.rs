use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::PlantPatch,
    repo::{self, Plant},
    services::{delete_plant as remove_plant, patch_plant},
};
use crate::{
    error::{ApiError, ApiJson, ApiPath},
    state::AppState,
};

pub fn plant_routes() -> Router<AppState> {
    Router::new().route(
        "/plants/:id",
        get(get_plant).patch(update_plant).delete(delete_plant),
    )
}

#[instrument(skip(state))]
pub async fn get_plant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Plant>, ApiError> {
    match repo::find(&state.db, id).await {
        Ok(Some(plant)) => Ok(Json(plant)),
        Ok(None) => {
            warn!(%id, "plant not found");
            Err(ApiError::NotFound("Plant"))
        }
        Err(e) => Err(ApiError::from_store(e, format!("fetch plant {id}"))),
    }
}

#[instrument(skip(state, patch))]
pub async fn update_plant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<PlantPatch>,
) -> Result<Json<Plant>, ApiError> {
    match patch_plant(&state.db, id, patch).await {
        Ok(Some(plant)) => {
            info!(%id, is_in_stock = plant.is_in_stock, "plant updated");
            Ok(Json(plant))
        }
        Ok(None) => {
            warn!(%id, "plant not found");
            Err(ApiError::NotFound("Plant"))
        }
        Err(e) => Err(ApiError::from_store(e, format!("update plant {id}"))),
    }
}

#[instrument(skip(state))]
pub async fn delete_plant(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    match remove_plant(&state.db, id).await {
        Ok(true) => {
            info!(%id, "plant deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            warn!(%id, "plant not found");
            Err(ApiError::NotFound("Plant"))
        }
        Err(e) => Err(ApiError::Internal(e.context(format!("delete plant {id}")))),
    }
}
