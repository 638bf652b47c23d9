//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! Handlers extract and log the request, call one domain service, and turn
//! the outcome into a status code. Request bodies and query strings are the
//! DTOs of the `shared` crate; responses are mapped back to those DTOs.
//!
//! ## Status codes
//!
//! - **201**: entity created (no body)
//! - **200**: listing or fetch (JSON body), update/return/delete (no body)
//! - **400**: invalid payload, unknown referenced entity, rental not open or
//!   game out of stock
//! - **404**: addressed entity does not exist
//! - **409**: unique name or cpf already taken
//! - **500**: storage failure (no body)

pub mod rest;

pub use rest::*;
