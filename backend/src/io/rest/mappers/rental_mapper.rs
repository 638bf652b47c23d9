use crate::domain::models::RentalDetails;
use crate::io::rest::mappers::DATE_FORMAT;
use shared::{Rental as SharedRental, RentalCustomer, RentalGame};

/// Mapper from joined rental rows to the enriched rental DTO
pub struct RentalMapper;

impl RentalMapper {
    pub fn to_dto(domain: RentalDetails) -> SharedRental {
        let RentalDetails {
            rental,
            customer_name,
            game_name,
            category_id,
            category_name,
        } = domain;

        SharedRental {
            id: rental.id,
            customer_id: rental.customer_id,
            game_id: rental.game_id,
            rent_date: rental.rent_date.format(DATE_FORMAT).to_string(),
            days_rented: rental.days_rented,
            return_date: rental.return_date.map(|d| d.format(DATE_FORMAT).to_string()),
            original_price: rental.original_price,
            delay_fee: rental.delay_fee,
            customer: RentalCustomer {
                id: rental.customer_id,
                name: customer_name,
            },
            game: RentalGame {
                id: rental.game_id,
                name: game_name,
                category_id,
                category_name,
            },
        }
    }
}
