pub mod category_mapper;
pub mod customer_mapper;
pub mod game_mapper;
pub mod rental_mapper;

/// Wire format of every date in the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";
