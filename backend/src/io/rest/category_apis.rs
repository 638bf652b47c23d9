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
use shared::{Category, CreateCategoryRequest};
use tracing::info;

use crate::domain::Page;
use crate::io::rest::errors::ApiError;
use crate::io::rest::mappers::category_mapper::CategoryMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories).post(create_category))
}

/// Query parameters for GET /categories
#[derive(Deserialize, Debug)]
pub struct CategoryListQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Axum handler function for GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    query: Result<Query<CategoryListQuery>, QueryRejection>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let Query(query) = query?;
    info!("GET /categories - query: {:?}", query);

    let categories = state
        .category_service
        .list_categories(Page::new(query.offset, query.limit))
        .await?;

    Ok(Json(categories.into_iter().map(CategoryMapper::to_dto).collect()))
}

/// Axum handler function for POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    request: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = request?;
    info!("POST /categories - request: {:?}", request);

    state.category_service.create_category(request).await?;
    Ok(StatusCode::CREATED)
}
