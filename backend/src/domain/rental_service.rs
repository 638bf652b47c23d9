//! # Rental Lifecycle
//!
//! Creates, returns and deletes rentals.
//!
//! ```text
//!            create            return
//!   (none) ─────────▶ Open ─────────────▶ Returned
//!                       │
//!                       │ delete
//!                       ▼
//!                    Deleted
//! ```
//!
//! Creation fails with a single coarse "bad request" kind of error whether the
//! customer is missing, the game is missing, or the game is out of stock; the
//! message says which, the status does not.

use std::sync::Arc;

use shared::CreateRentalRequest;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::commands::{Page, RentalFilter};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{NewRental, Rental, RentalDetails};
use crate::domain::validation::{validate_rental, ValidationError};
use crate::storage::{CustomerRepository, DbConnection, GameRepository, RentalRepository};

/// Service driving the rental lifecycle
#[derive(Clone)]
pub struct RentalService {
    rentals: RentalRepository,
    customers: CustomerRepository,
    games: GameRepository,
    clock: Arc<dyn Clock>,
}

impl RentalService {
    pub fn new(db: DbConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            rentals: RentalRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            games: GameRepository::new(db),
            clock,
        }
    }

    pub async fn list_rentals(&self, filter: &RentalFilter, page: Page) -> DomainResult<Vec<RentalDetails>> {
        let rentals = self.rentals.list_rentals(filter, page).await?;
        info!("Found {} rentals for filter {:?}", rentals.len(), filter);
        Ok(rentals)
    }

    /// Open a rental priced at `days_rented * price_per_day`, dated today
    pub async fn create_rental(&self, request: CreateRentalRequest) -> DomainResult<Rental> {
        let request = validate_rental(&request)?;

        if self.customers.get_customer(request.customer_id).await?.is_none() {
            warn!("Rental requested for unknown customer {}", request.customer_id);
            return Err(DomainError::BadReference(format!(
                "Customer {} does not exist",
                request.customer_id
            )));
        }

        let game = match self.games.get_game(request.game_id).await? {
            Some(game) => game,
            None => {
                warn!("Rental requested for unknown game {}", request.game_id);
                return Err(DomainError::BadReference(format!("Game {} does not exist", request.game_id)));
            }
        };

        let open_rentals = self.rentals.count_open_rentals(game.id).await?;
        if open_rentals >= game.stock_total {
            warn!("Game {} is out of stock ({} of {} rented)", game.id, open_rentals, game.stock_total);
            return Err(out_of_stock(game.id));
        }

        let rent_date = self.clock.today();
        let new_rental = NewRental::priced(
            request.customer_id,
            game.id,
            rent_date,
            request.days_rented,
            game.price_per_day,
        )
        .ok_or(ValidationError::TooLarge("daysRented"))?;

        // The insert re-checks stock itself; a concurrent rental may have
        // taken the last unit since the count above.
        let id = match self.rentals.store_rental_if_in_stock(&new_rental).await? {
            Some(id) => id,
            None => {
                warn!("Game {} ran out of stock before the rental was stored", game.id);
                return Err(out_of_stock(game.id));
            }
        };

        info!(
            "Created rental {} of game {} for customer {}: {} days, price {}",
            id, new_rental.game_id, new_rental.customer_id, new_rental.days_rented, new_rental.original_price
        );
        Ok(Rental {
            id,
            customer_id: new_rental.customer_id,
            game_id: new_rental.game_id,
            rent_date: new_rental.rent_date,
            days_rented: new_rental.days_rented,
            return_date: None,
            original_price: new_rental.original_price,
            delay_fee: None,
        })
    }

    /// Close an open rental today, charging the delay fee if it is overdue
    pub async fn return_rental(&self, rental_id: i64) -> DomainResult<Rental> {
        let mut rental = self.open_rental(rental_id).await?;

        let today = self.clock.today();
        let delay_fee = rental.delay_fee_on(today);

        if !self.rentals.mark_returned(rental_id, today, delay_fee).await? {
            return Err(self.explain_missed_write(rental_id).await?);
        }

        rental.return_date = Some(today);
        rental.delay_fee = Some(delay_fee);
        info!("Returned rental {} on {} with delay fee {}", rental_id, today, delay_fee);
        Ok(rental)
    }

    /// Remove a rental that has not been returned yet
    pub async fn delete_rental(&self, rental_id: i64) -> DomainResult<()> {
        self.open_rental(rental_id).await?;

        if !self.rentals.delete_open_rental(rental_id).await? {
            return Err(self.explain_missed_write(rental_id).await?);
        }

        info!("Deleted rental {}", rental_id);
        Ok(())
    }

    /// Fetch a rental that must exist and still be open
    async fn open_rental(&self, rental_id: i64) -> DomainResult<Rental> {
        match self.rentals.get_rental(rental_id).await? {
            None => {
                warn!("Rental not found: {}", rental_id);
                Err(not_found(rental_id))
            }
            Some(rental) if !rental.is_open() => {
                warn!("Rental {} was already returned", rental_id);
                Err(already_returned(rental_id))
            }
            Some(rental) => Ok(rental),
        }
    }

    /// A guarded write touched no row: the rental was returned or deleted by
    /// another request after we looked at it
    async fn explain_missed_write(&self, rental_id: i64) -> DomainResult<DomainError> {
        Ok(match self.rentals.get_rental(rental_id).await? {
            None => not_found(rental_id),
            Some(_) => already_returned(rental_id),
        })
    }
}

fn not_found(rental_id: i64) -> DomainError {
    DomainError::NotFound(format!("Rental {} not found", rental_id))
}

fn already_returned(rental_id: i64) -> DomainError {
    DomainError::InvalidState(format!("Rental {} was already returned", rental_id))
}

fn out_of_stock(game_id: i64) -> DomainError {
    DomainError::InvalidState(format!("Game {} has no units available", game_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::{CategoryService, CustomerService, GameService};
    use chrono::NaiveDate;
    use shared::{CreateCategoryRequest, CreateGameRequest, CustomerRequest};

    struct Fixture {
        service: RentalService,
        clock: Arc<FixedClock>,
        customer_id: i64,
        game_id: i64,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A customer and a game costing 10/day with `stock_total` units
    async fn setup_test(stock_total: i64) -> Fixture {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let clock = Arc::new(FixedClock::new(date(2024, 3, 1)));

        let category = CategoryService::new(db.clone())
            .create_category(CreateCategoryRequest { name: Some("Strategy".to_string()) })
            .await
            .unwrap();
        let game = GameService::new(db.clone())
            .create_game(CreateGameRequest {
                name: Some("Catan".to_string()),
                image: None,
                stock_total: Some(stock_total),
                category_id: Some(category.id),
                price_per_day: Some(10),
            })
            .await
            .unwrap();
        let customer = CustomerService::new(db.clone(), clock.clone())
            .create_customer(CustomerRequest {
                name: Some("João".to_string()),
                phone: Some("21998899222".to_string()),
                cpf: Some("01234567890".to_string()),
                birthday: Some("1992-10-05".to_string()),
            })
            .await
            .unwrap();

        Fixture {
            service: RentalService::new(db, clock.clone()),
            clock,
            customer_id: customer.id,
            game_id: game.id,
        }
    }

    fn request(fixture: &Fixture, days_rented: i64) -> CreateRentalRequest {
        CreateRentalRequest {
            customer_id: Some(fixture.customer_id),
            game_id: Some(fixture.game_id),
            days_rented: Some(days_rented),
        }
    }

    async fn stored(fixture: &Fixture, rental_id: i64) -> Option<Rental> {
        fixture.service.rentals.get_rental(rental_id).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_prices_and_dates_rental() {
        let fixture = setup_test(1).await;

        let rental = fixture.service.create_rental(request(&fixture, 3)).await.expect("Failed to create rental");
        assert_eq!(rental.original_price, 30);
        assert_eq!(rental.rent_date, date(2024, 3, 1));
        assert!(rental.is_open());
        assert_eq!(stored(&fixture, rental.id).await, Some(rental));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_customer_and_game() {
        let fixture = setup_test(1).await;

        let mut unknown_customer = request(&fixture, 3);
        unknown_customer.customer_id = Some(fixture.customer_id + 50);
        assert!(matches!(
            fixture.service.create_rental(unknown_customer).await,
            Err(DomainError::BadReference(_))
        ));

        let mut unknown_game = request(&fixture, 3);
        unknown_game.game_id = Some(fixture.game_id + 50);
        assert!(matches!(
            fixture.service.create_rental(unknown_game).await,
            Err(DomainError::BadReference(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_zero_days() {
        let fixture = setup_test(1).await;
        assert!(matches!(
            fixture.service.create_rental(request(&fixture, 0)).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_when_stock_exhausted() {
        let fixture = setup_test(2).await;
        fixture.service.create_rental(request(&fixture, 3)).await.unwrap();
        fixture.service.create_rental(request(&fixture, 3)).await.unwrap();

        let result = fixture.service.create_rental(request(&fixture, 3)).await;
        assert!(matches!(result, Err(DomainError::InvalidState(_))));

        let rentals = fixture.service.list_rentals(&RentalFilter::default(), Page::default()).await.unwrap();
        assert_eq!(rentals.len(), 2);
    }

    #[tokio::test]
    async fn test_return_on_due_date_has_no_fee() {
        let fixture = setup_test(1).await;
        let rental = fixture.service.create_rental(request(&fixture, 3)).await.unwrap();

        fixture.clock.advance_days(3);
        let returned = fixture.service.return_rental(rental.id).await.expect("Failed to return rental");
        assert_eq!(returned.return_date, Some(date(2024, 3, 4)));
        assert_eq!(returned.delay_fee, Some(0));
    }

    #[tokio::test]
    async fn test_return_late_charges_each_day() {
        let fixture = setup_test(1).await;
        let rental = fixture.service.create_rental(request(&fixture, 3)).await.unwrap();

        fixture.clock.advance_days(5);
        let returned = fixture.service.return_rental(rental.id).await.unwrap();
        assert_eq!(returned.delay_fee, Some(20));
        assert_eq!(stored(&fixture, rental.id).await.unwrap().delay_fee, Some(20));
    }

    #[tokio::test]
    async fn test_return_twice_is_rejected_and_keeps_first_return() {
        let fixture = setup_test(1).await;
        let rental = fixture.service.create_rental(request(&fixture, 3)).await.unwrap();

        fixture.clock.advance_days(1);
        fixture.service.return_rental(rental.id).await.unwrap();

        fixture.clock.advance_days(10);
        let result = fixture.service.return_rental(rental.id).await;
        assert!(matches!(result, Err(DomainError::InvalidState(_))));

        let rental = stored(&fixture, rental.id).await.unwrap();
        assert_eq!(rental.return_date, Some(date(2024, 3, 2)));
        assert_eq!(rental.delay_fee, Some(0));
    }

    #[tokio::test]
    async fn test_return_unknown_rental() {
        let fixture = setup_test(1).await;
        assert!(matches!(fixture.service.return_rental(404).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_returning_frees_stock() {
        let fixture = setup_test(1).await;
        let rental = fixture.service.create_rental(request(&fixture, 3)).await.unwrap();
        fixture.service.return_rental(rental.id).await.unwrap();

        assert!(fixture.service.create_rental(request(&fixture, 1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_open_rental() {
        let fixture = setup_test(1).await;
        let rental = fixture.service.create_rental(request(&fixture, 3)).await.unwrap();

        fixture.service.delete_rental(rental.id).await.expect("Failed to delete rental");
        assert!(stored(&fixture, rental.id).await.is_none());
        assert!(matches!(fixture.service.delete_rental(rental.id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_returned_rental_is_rejected() {
        let fixture = setup_test(1).await;
        let rental = fixture.service.create_rental(request(&fixture, 3)).await.unwrap();
        fixture.service.return_rental(rental.id).await.unwrap();

        let result = fixture.service.delete_rental(rental.id).await;
        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert!(stored(&fixture, rental.id).await.is_some());
    }
}
