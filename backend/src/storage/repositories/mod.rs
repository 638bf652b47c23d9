pub mod category_repository;
pub mod customer_repository;
pub mod game_repository;
pub mod rental_repository;

pub use category_repository::CategoryRepository;
pub use customer_repository::CustomerRepository;
pub use game_repository::GameRepository;
pub use rental_repository::RentalRepository;
