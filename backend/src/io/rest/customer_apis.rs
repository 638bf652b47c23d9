use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{Customer, CustomerRequest};
use tracing::info;

use crate::domain::Page;
use crate::io::rest::errors::ApiError;
use crate::io::rest::mappers::customer_mapper::CustomerMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/:id", get(get_customer).put(update_customer))
}

/// Query parameters for GET /customers
#[derive(Deserialize, Debug)]
pub struct CustomerListQuery {
    /// Cpf prefix
    pub cpf: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Axum handler function for GET /customers
pub async fn list_customers(
    State(state): State<AppState>,
    query: Result<Query<CustomerListQuery>, QueryRejection>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let Query(query) = query?;
    info!("GET /customers - query: {:?}", query);

    let customers = state
        .customer_service
        .list_customers(query.cpf.as_deref(), Page::new(query.offset, query.limit))
        .await?;

    Ok(Json(customers.into_iter().map(CustomerMapper::to_dto).collect()))
}

/// Axum handler function for GET /customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Path(id) = id?;
    info!("GET /customers/{}", id);

    let customer = state.customer_service.get_customer(id).await?;
    Ok(Json(CustomerMapper::to_dto(customer)))
}

/// Axum handler function for POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    request: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = request?;
    info!("POST /customers - request: {:?}", request);

    state.customer_service.create_customer(request).await?;
    Ok(StatusCode::CREATED)
}

/// Axum handler function for PUT /customers/:id
pub async fn update_customer(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let Json(request) = request?;
    info!("PUT /customers/{} - request: {:?}", id, request);

    state.customer_service.update_customer(id, request).await?;
    Ok(StatusCode::OK)
}
