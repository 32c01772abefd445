mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

pub use dto::PlantPatch;

use crate::auth::gate::{with_access, Access};
use crate::state::AppState;
use axum::Router;

pub fn router(state: &AppState) -> Router<AppState> {
    let access = if state.config.plants_public {
        Access::Open
    } else {
        Access::Authenticated
    };
    with_access(handlers::plant_routes(), access)
}
