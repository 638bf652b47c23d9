//! # Game Rental Store Backend
//!
//! REST backend for a game rental store: a catalogue of categories and games,
//! a customer registry, and the rental lifecycle (open, return, delete) with
//! stock limits and delay fees.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, error mapping)
//!     ↓
//! Domain Layer (validation, services, rental arithmetic)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```
//!
//! `initialize_backend` opens the database and wires the services into an
//! [`AppState`]; `create_router` builds the axum router around it.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::{CategoryService, Clock, CustomerService, GameService, RentalService, SystemClock};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub db: DbConnection,
    pub category_service: CategoryService,
    pub game_service: GameService,
    pub customer_service: CustomerService,
    pub rental_service: RentalService,
}

/// Wire every service onto one database handle and clock
pub fn build_state(db: DbConnection, clock: Arc<dyn Clock>) -> AppState {
    AppState {
        category_service: CategoryService::new(db.clone()),
        game_service: GameService::new(db.clone()),
        customer_service: CustomerService::new(db.clone(), clock.clone()),
        rental_service: RentalService::new(db.clone(), clock),
        db,
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database.url);
    let db = DbConnection::new(&config.database.url, config.database.max_connections).await?;

    info!("Setting up application state");
    Ok(build_state(db, Arc::new(SystemClock)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match &config.server.cors_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{}'", origin))?;
            cors.allow_origin(origin)
        }
        None => cors.allow_origin(Any),
    };

    Ok(Router::new()
        .merge(io::rest::category_apis::router())
        .merge(io::rest::game_apis::router())
        .merge(io::rest::customer_apis::router())
        .merge(io::rest::rental_apis::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
