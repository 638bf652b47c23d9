//! # Storage Module
//!
//! Handles all data persistence for the game rental store.
//!
//! Every statement is parameterized: user-supplied values only ever reach
//! SQLite as bound parameters, never as part of the SQL text.
//!
//! ## Components
//!
//! - **connection.rs** - pool lifecycle and schema setup
//! - **repositories/** - one repository per table (categories, games,
//!   customers, rentals), including the join projections used for listings
//!
//! ## Constraint enforcement
//!
//! The schema carries the UNIQUE, CHECK and FOREIGN KEY constraints that back
//! the domain rules. Domain services still check first so they can report a
//! precise error, but the constraints are what keep concurrent requests
//! honest; see [`is_unique_violation`].

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    CategoryRepository,
    CustomerRepository,
    GameRepository,
    RentalRepository,
};

/// Returns true when the error came from a UNIQUE constraint rejecting a write
pub fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map_or(false, |e| e.is_unique_violation())
}

/// Turns a user-supplied prefix into a `LIKE` pattern.
///
/// `\`, `%` and `_` are escaped so they match literally; queries using the
/// pattern must declare `ESCAPE '\'`.
pub fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
