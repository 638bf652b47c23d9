//! # Domain Module
//!
//! Contains the business rules of the game rental store.
//!
//! ## Module Organization
//!
//! - **validation**: payload rules for categories, games, customers and rentals
//! - **models**: domain entities and the rental date/fee arithmetic
//! - **rental_service**: the rental lifecycle (create, return, delete)
//! - **category_service**, **game_service**, **customer_service**: catalogue
//!   and customer management
//! - **clock**: where "today" comes from
//!
//! ## Business Rules
//!
//! - Category names, game names and customer cpfs are unique
//! - A game can have at most `stock_total` rentals open at once
//! - A rental's price is fixed when it is opened
//! - Only open rentals can be returned or deleted
//! - The delay fee is charged once, at return, per whole day past the due date

pub mod category_service;
pub mod clock;
pub mod commands;
pub mod customer_service;
pub mod errors;
pub mod game_service;
pub mod models;
pub mod rental_service;
pub mod validation;

pub use category_service::CategoryService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::{Page, RentalFilter};
pub use customer_service::CustomerService;
pub use errors::{DomainError, DomainResult};
pub use game_service::GameService;
pub use rental_service::RentalService;
pub use validation::ValidationError;
