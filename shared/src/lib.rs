use serde::{Deserialize, Serialize};

/// A game category, e.g. "Strategy" or "Party"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

/// A game as listed by `GET /games`, enriched with its category name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub stock_total: i64,
    pub category_id: i64,
    /// Price in cents
    pub price_per_day: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub stock_total: Option<i64>,
    pub category_id: Option<i64>,
    pub price_per_day: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// 11-digit personal identifier
    pub cpf: String,
    /// YYYY-MM-DD
    pub birthday: String,
}

/// Body of both `POST /customers` and `PUT /customers/:id`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub birthday: Option<String>,
}

/// A rental as listed by `GET /rentals`, joined with customer and game data.
///
/// `return_date` and `delay_fee` stay `null` while the rental is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: i64,
    pub customer_id: i64,
    pub game_id: i64,
    /// YYYY-MM-DD
    pub rent_date: String,
    pub days_rented: i64,
    /// YYYY-MM-DD
    pub return_date: Option<String>,
    pub original_price: i64,
    pub delay_fee: Option<i64>,
    pub customer: RentalCustomer,
    pub game: RentalGame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCustomer {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalGame {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub customer_id: Option<i64>,
    pub game_id: Option<i64>,
    pub days_rented: Option<i64>,
}

/// Whether a rental listing should include open or returned rentals only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Open,
    Closed,
}

/// Body of every 4xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
