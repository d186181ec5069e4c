use axum::{
    extract::{FromRequest, FromRequestParts, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use sqlx::postgres::PgPool;

use crate::config::DeleteResponse;
use crate::db;
use crate::error::{Action, ApiError};
use crate::models::{DeleteConfirmation, Player, PlayerPayload};

/// `{id}` path segment, parsed before any query runs
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct PlayerId(pub i32);

/// JSON body whose rejections use the API error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct PlayerBody<T>(pub T);

// GET /players - List all players
pub async fn list_players(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = db::list_players(&pool)
        .await
        .map_err(ApiError::database(Action::ListPlayers))?;

    Ok(Json(players))
}

// GET /players/:id - Get player by ID
pub async fn get_player(
    State(pool): State<PgPool>,
    PlayerId(id): PlayerId,
) -> Result<Json<Player>, ApiError> {
    let player = db::get_player(&pool, id)
        .await
        .map_err(ApiError::database(Action::GetPlayer))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

// PUT /players/:id - Overwrite name and position
pub async fn update_player(
    State(pool): State<PgPool>,
    PlayerId(id): PlayerId,
    PlayerBody(payload): PlayerBody<PlayerPayload>,
) -> Result<Json<Player>, ApiError> {
    let player = db::update_player(&pool, id, &payload)
        .await
        .map_err(ApiError::database(Action::UpdatePlayer))?
        .ok_or(ApiError::NotFound)?;

    tracing::debug!(player_id = player.id, "player updated");

    Ok(Json(player))
}

// POST /players - Create a player, id assigned by the database
pub async fn create_player(
    State(pool): State<PgPool>,
    PlayerBody(payload): PlayerBody<PlayerPayload>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player = db::create_player(&pool, &payload)
        .await
        .map_err(ApiError::database(Action::CreatePlayer))?;

    tracing::debug!(player_id = player.id, "player created");

    Ok((StatusCode::CREATED, Json(player)))
}

// DELETE /players/:id - Remove a player
pub async fn delete_player(
    State(pool): State<PgPool>,
    State(reply): State<DeleteResponse>,
    PlayerId(id): PlayerId,
) -> Result<Response, ApiError> {
    let deleted = db::delete_player(&pool, id)
        .await
        .map_err(ApiError::database(Action::DeletePlayer))?
        .ok_or(ApiError::NotFound)?;

    tracing::debug!(player_id = deleted.id, "player deleted");

    let response = match reply {
        DeleteResponse::Message => Json(DeleteConfirmation::default()).into_response(),
        DeleteResponse::NoContent => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(response)
}
