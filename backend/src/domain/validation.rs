//! # Validation
//!
//! Turns raw request payloads into normalized, validated values.
//!
//! Each function either returns the value that will be written (names
//! trimmed, dates parsed) or the first rule the payload breaks. Nothing here
//! touches storage: existence and uniqueness are checked by the services.

use chrono::NaiveDate;
use shared::{CreateCategoryRequest, CreateGameRequest, CreateRentalRequest, CustomerRequest};
use thiserror::Error;

use crate::domain::models::{CustomerFields, NewCategory, NewGame};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
    #[error("{0} is too large")]
    TooLarge(&'static str),
    #[error("phone must have 10 or 11 digits")]
    InvalidPhone,
    #[error("cpf must have exactly 11 digits")]
    InvalidCpf,
    #[error("birthday must be a date in YYYY-MM-DD format")]
    InvalidBirthday,
    #[error("birthday must be in the past")]
    BirthdayNotInPast,
    #[error("invalid request: {0}")]
    Malformed(String),
}

/// A rental request that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRentalRequest {
    pub customer_id: i64,
    pub game_id: i64,
    pub days_rented: i64,
}

pub fn validate_category(request: &CreateCategoryRequest) -> Result<NewCategory, ValidationError> {
    Ok(NewCategory {
        name: required_name(request.name.as_deref())?,
    })
}

pub fn validate_game(request: &CreateGameRequest) -> Result<NewGame, ValidationError> {
    Ok(NewGame {
        name: required_name(request.name.as_deref())?,
        image: request.image.clone(),
        stock_total: positive("stockTotal", request.stock_total)?,
        category_id: positive("categoryId", request.category_id)?,
        price_per_day: positive("pricePerDay", request.price_per_day)?,
    })
}

/// Validate a customer payload. `today` is the first date a birthday may
/// not fall on.
pub fn validate_customer(request: &CustomerRequest, today: NaiveDate) -> Result<CustomerFields, ValidationError> {
    let name = required_name(request.name.as_deref())?;

    let phone = request.phone.as_deref().ok_or(ValidationError::Missing("phone"))?;
    if !(10..=11).contains(&phone.len()) || !all_digits(phone) {
        return Err(ValidationError::InvalidPhone);
    }

    let cpf = request.cpf.as_deref().ok_or(ValidationError::Missing("cpf"))?;
    if cpf.len() != 11 || !all_digits(cpf) {
        return Err(ValidationError::InvalidCpf);
    }

    let birthday = request.birthday.as_deref().ok_or(ValidationError::Missing("birthday"))?;
    let birthday = NaiveDate::parse_from_str(birthday.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidBirthday)?;
    if birthday >= today {
        return Err(ValidationError::BirthdayNotInPast);
    }

    Ok(CustomerFields {
        name,
        phone: phone.to_string(),
        cpf: cpf.to_string(),
        birthday,
    })
}

pub fn validate_rental(request: &CreateRentalRequest) -> Result<ValidRentalRequest, ValidationError> {
    Ok(ValidRentalRequest {
        customer_id: positive("customerId", request.customer_id)?,
        game_id: positive("gameId", request.game_id)?,
        days_rented: positive("daysRented", request.days_rented)?,
    })
}

fn required_name(name: Option<&str>) -> Result<String, ValidationError> {
    let name = name.ok_or(ValidationError::Missing("name"))?.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty("name"));
    }
    Ok(name.to_string())
}

fn positive(field: &'static str, value: Option<i64>) -> Result<i64, ValidationError> {
    match value {
        None => Err(ValidationError::Missing(field)),
        Some(v) if v > 0 => Ok(v),
        Some(_) => Err(ValidationError::NotPositive(field)),
    }
}

fn all_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}
