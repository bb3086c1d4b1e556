use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        lock::{DifferenceRequest, LockRequest, LockResponse},
        weekly::WeeklyLeaderboard,
    },
    models::{DifferenceMember, Leaderboard},
};
use validator::Validate;

use crate::{
    error::WebError,
    state::{AppState, now_millis},
};

use super::services;

#[utoipa::path(
    post,
    path = "/api/leaderboard",
    request_body = LockRequest,
    responses(
        (status = 200, description = "Effective locked leaderboard for this week", body = LockResponse),
        (status = 400, description = "Invalid leaderboard"),
        (status = 500, description = "Locked leaderboard has not been seeded")
    ),
    tag = "leaderboard"
)]
pub async fn resolve_lock(
    State(state): State<AppState>,
    payload: Result<Json<LockRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(request) = payload?;
    request.validate()?;
    request.check_unique().map_err(WebError::BadRequest)?;

    let leaderboard = request.into_leaderboard();
    let resolution = services::resolve_lock(state.engine(), &leaderboard, now_millis()).await?;

    Ok(Json(LockResponse::from(resolution)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/leaderboard/difference",
    request_body = DifferenceRequest,
    responses(
        (status = 200, description = "XP gained per member, highest first", body = Vec<DifferenceMember>),
        (status = 400, description = "Invalid leaderboard")
    ),
    tag = "leaderboard"
)]
pub async fn compute_difference(
    payload: Result<Json<DifferenceRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(request) = payload?;
    request.validate()?;

    let current = Leaderboard::from_members(request.current_leaderboard);
    let locked = Leaderboard::from_members(request.locked_leaderboard);

    if let Some(name) = current.duplicate_username().or(locked.duplicate_username()) {
        return Err(WebError::BadRequest(format!(
            "duplicate username '{}' in leaderboard",
            name
        )));
    }

    Ok(Json(services::difference(&current, &locked)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/weekly",
    responses(
        (status = 200, description = "Live, locked and difference leaderboards", body = WeeklyLeaderboard),
        (status = 500, description = "Locked leaderboard has not been seeded"),
        (status = 502, description = "Guild data could not be fetched")
    ),
    tag = "leaderboard"
)]
pub async fn get_weekly(State(state): State<AppState>) -> Result<Response, WebError> {
    let weekly = services::weekly(&state.refresh, now_millis()).await?;

    Ok(Json(weekly).into_response())
}
