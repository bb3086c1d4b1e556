use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{dto::guild::CurrentLeaderboardFilter, models::Member};

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/guild",
    responses(
        (status = 200, description = "Raw guild roster from the game API", content_type = "application/json"),
        (status = 502, description = "Guild data could not be fetched")
    ),
    tag = "guild"
)]
pub async fn get_guild(State(state): State<AppState>) -> Result<Response, WebError> {
    let payload = services::fetch_roster(&state.refresh).await?;

    Ok(Json(payload).into_response())
}

#[utoipa::path(
    get,
    path = "/api/guild/leaderboard",
    params(CurrentLeaderboardFilter),
    responses(
        (status = 200, description = "Live leaderboard sorted by contributed XP", body = Vec<Member>),
        (status = 400, description = "Invalid query parameters"),
        (status = 502, description = "Guild data could not be fetched")
    ),
    tag = "guild"
)]
pub async fn get_current_leaderboard(
    State(state): State<AppState>,
    Query(filter): Query<CurrentLeaderboardFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let leaderboard = services::current_leaderboard(&state.refresh, &filter).await?;

    Ok(Json(leaderboard).into_response())
}
