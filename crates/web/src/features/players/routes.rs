use axum::{Router, routing::get};

use super::handlers::get_player;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:name", get(get_player))
}
