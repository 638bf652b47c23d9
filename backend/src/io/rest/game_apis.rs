use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{CreateGameRequest, Game};
use tracing::info;

use crate::domain::Page;
use crate::io::rest::errors::ApiError;
use crate::io::rest::mappers::game_mapper::GameMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/games", get(list_games).post(create_game))
}

/// Query parameters for GET /games
#[derive(Deserialize, Debug)]
pub struct GameListQuery {
    /// Case-insensitive name prefix
    pub name: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Axum handler function for GET /games
pub async fn list_games(
    State(state): State<AppState>,
    query: Result<Query<GameListQuery>, QueryRejection>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let Query(query) = query?;
    info!("GET /games - query: {:?}", query);

    let games = state
        .game_service
        .list_games(query.name.as_deref(), Page::new(query.offset, query.limit))
        .await?;

    Ok(Json(games.into_iter().map(GameMapper::to_dto).collect()))
}

/// Axum handler function for POST /games
pub async fn create_game(
    State(state): State<AppState>,
    request: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = request?;
    info!("POST /games - request: {:?}", request);

    state.game_service.create_game(request).await?;
    Ok(StatusCode::CREATED)
}
