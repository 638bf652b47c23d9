pub mod category;
pub mod customer;
pub mod game;
pub mod rental;

pub use category::{Category, NewCategory};
pub use customer::{Customer, CustomerFields};
pub use game::{Game, GameWithCategory, NewGame};
pub use rental::{NewRental, Rental, RentalDetails};
