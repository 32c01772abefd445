mod dto;
pub mod handlers;
pub mod repo;

use crate::auth::gate::{with_access, Access};
use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    with_access(handlers::recipe_routes(), Access::Authenticated)
}
