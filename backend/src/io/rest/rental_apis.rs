use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{CreateRentalRequest, Rental, RentalStatus};
use tracing::info;

use crate::domain::{Page, RentalFilter};
use crate::io::rest::errors::ApiError;
use crate::io::rest::mappers::rental_mapper::RentalMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rentals", get(list_rentals).post(create_rental))
        .route("/rentals/:id/return", post(return_rental))
        .route("/rentals/:id", delete(delete_rental))
}

/// Query parameters for GET /rentals
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RentalListQuery {
    pub customer_id: Option<i64>,
    pub game_id: Option<i64>,
    pub status: Option<RentalStatus>,
    /// Only rentals opened on or after this date
    pub start_date: Option<NaiveDate>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Axum handler function for GET /rentals
pub async fn list_rentals(
    State(state): State<AppState>,
    query: Result<Query<RentalListQuery>, QueryRejection>,
) -> Result<Json<Vec<Rental>>, ApiError> {
    let Query(query) = query?;
    info!("GET /rentals - query: {:?}", query);

    let filter = RentalFilter {
        customer_id: query.customer_id,
        game_id: query.game_id,
        status: query.status,
        start_date: query.start_date,
    };
    let rentals = state
        .rental_service
        .list_rentals(&filter, Page::new(query.offset, query.limit))
        .await?;

    Ok(Json(rentals.into_iter().map(RentalMapper::to_dto).collect()))
}

/// Axum handler function for POST /rentals
pub async fn create_rental(
    State(state): State<AppState>,
    request: Result<Json<CreateRentalRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = request?;
    info!("POST /rentals - request: {:?}", request);

    state.rental_service.create_rental(request).await?;
    Ok(StatusCode::CREATED)
}

/// Axum handler function for POST /rentals/:id/return
pub async fn return_rental(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    info!("POST /rentals/{}/return", id);

    state.rental_service.return_rental(id).await?;
    Ok(StatusCode::OK)
}

/// Axum handler function for DELETE /rentals/:id
pub async fn delete_rental(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    info!("DELETE /rentals/{}", id);

    state.rental_service.delete_rental(id).await?;
    Ok(StatusCode::OK)
}
