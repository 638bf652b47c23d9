//! # REST API Interface Layer
//!
//! HTTP endpoints for the game rental store:
//!
//! - `GET|POST /categories`
//! - `GET|POST /games`
//! - `GET|POST /customers`, `GET|PUT /customers/:id`
//! - `GET|POST /rentals`, `POST /rentals/:id/return`, `DELETE /rentals/:id`
//!
//! Each `*_apis` module exposes a `router()` that [`crate::create_router`]
//! merges into the application router.

pub mod category_apis;
pub mod customer_apis;
pub mod errors;
pub mod game_apis;
pub mod mappers;
pub mod rental_apis;

pub use errors::ApiError;
