use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod extractors;
pub mod gate;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod session;

use gate::{with_access, Access};

pub fn router() -> Router<AppState> {
    // logout stays open so repeated calls keep answering 204
    with_access(handlers::auth_routes(), Access::Open)
}
