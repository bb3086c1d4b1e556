use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use roster::PlayerProfile;

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/players/{name}",
    params(
        ("name" = String, Path, description = "Player username")
    ),
    responses(
        (status = 200, description = "Player profile", body = PlayerProfile),
        (status = 404, description = "Player not found"),
        (status = 502, description = "Player data could not be fetched")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, WebError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WebError::BadRequest("player name must not be empty".to_string()));
    }

    let profile = services::get_player(state.source().as_ref(), name).await?;

    Ok(Json(profile).into_response())
}
