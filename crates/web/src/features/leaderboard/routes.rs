use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{compute_difference, get_weekly, resolve_lock};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(resolve_lock))
        .route("/difference", post(compute_difference))
        .route("/weekly", get(get_weekly))
}
