use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub(crate) mod extractors;
pub mod password;
pub mod token;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
