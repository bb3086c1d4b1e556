use axum::{Router, routing::get};

use super::handlers::{get_current_leaderboard, get_guild};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_guild))
        .route("/leaderboard", get(get_current_leaderboard))
}
