use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::features::{guild, leaderboard, players};
use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/guild", guild::routes::routes())
        .nest("/leaderboard", leaderboard::routes::routes())
        .nest("/players", players::routes::routes());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
