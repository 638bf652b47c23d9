//! Rental model and the date/fee arithmetic of the rental lifecycle.
//!
//! A rental is **open** while `return_date` is `None`. Returning it fixes
//! `return_date` and `delay_fee` once; deleting is only allowed while open.

use chrono::{Days, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: i64,
    pub customer_id: i64,
    pub game_id: i64,
    pub rent_date: NaiveDate,
    pub days_rented: i64,
    pub return_date: Option<NaiveDate>,
    pub original_price: i64,
    pub delay_fee: Option<i64>,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// `rent_date + days_rented`, or `None` if that falls outside the
    /// representable calendar
    pub fn due_date(&self) -> Option<NaiveDate> {
        let days = u64::try_from(self.days_rented).ok()?;
        self.rent_date.checked_add_days(Days::new(days))
    }

    /// Daily price the rental was priced at
    pub fn price_per_day(&self) -> i64 {
        if self.days_rented > 0 {
            self.original_price / self.days_rented
        } else {
            0
        }
    }

    /// Whole days between the due date and `returned_on`, zero when on time
    pub fn days_late(&self, returned_on: NaiveDate) -> i64 {
        match self.due_date() {
            Some(due) if returned_on > due => (returned_on - due).num_days(),
            _ => 0,
        }
    }

    /// Fee owed when the rental is returned on `returned_on`
    pub fn delay_fee_on(&self, returned_on: NaiveDate) -> i64 {
        self.days_late(returned_on).saturating_mul(self.price_per_day())
    }
}

/// A rental about to be inserted, priced at creation time
#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub customer_id: i64,
    pub game_id: i64,
    pub rent_date: NaiveDate,
    pub days_rented: i64,
    pub original_price: i64,
}

impl NewRental {
    /// Price a new rental; `None` when `days_rented * price_per_day` overflows
    pub fn priced(
        customer_id: i64,
        game_id: i64,
        rent_date: NaiveDate,
        days_rented: i64,
        price_per_day: i64,
    ) -> Option<Self> {
        let original_price = days_rented.checked_mul(price_per_day)?;
        Some(Self {
            customer_id,
            game_id,
            rent_date,
            days_rented,
            original_price,
        })
    }
}

/// A rental joined with the customer, game and category it refers to
#[derive(Debug, Clone, PartialEq)]
pub struct RentalDetails {
    pub rental: Rental,
    pub customer_name: String,
    pub game_name: String,
    pub category_id: i64,
    pub category_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rental(rent_date: NaiveDate, days_rented: i64, original_price: i64) -> Rental {
        Rental {
            id: 1,
            customer_id: 1,
            game_id: 1,
            rent_date,
            days_rented,
            return_date: None,
            original_price,
            delay_fee: None,
        }
    }

    #[test]
    fn test_priced_multiplies_days_by_daily_price() {
        let new_rental = NewRental::priced(1, 2, date(2024, 3, 1), 3, 10).unwrap();
        assert_eq!(new_rental.original_price, 30);
    }

    #[test]
    fn test_priced_rejects_overflow() {
        assert!(NewRental::priced(1, 2, date(2024, 3, 1), i64::MAX, 2).is_none());
    }

    #[test]
    fn test_due_date_adds_rented_days() {
        let r = rental(date(2024, 2, 27), 3, 30);
        assert_eq!(r.due_date(), Some(date(2024, 3, 1))); // 2024 is a leap year
    }

    #[test]
    fn test_due_date_out_of_range() {
        let r = rental(date(2024, 1, 1), i64::MAX, 0);
        assert_eq!(r.due_date(), None);
        assert_eq!(r.delay_fee_on(date(2030, 1, 1)), 0);
    }

    #[test]
    fn test_no_fee_before_or_on_due_date() {
        let r = rental(date(2024, 3, 1), 3, 30);
        assert_eq!(r.delay_fee_on(date(2024, 3, 1)), 0);
        assert_eq!(r.delay_fee_on(date(2024, 3, 3)), 0);
        assert_eq!(r.delay_fee_on(date(2024, 3, 4)), 0);
    }

    #[test]
    fn test_fee_for_each_late_day() {
        // Rented for 3 days at 10/day, returned on day 5 -> 2 days late
        let r = rental(date(2024, 3, 1), 3, 30);
        assert_eq!(r.days_late(date(2024, 3, 6)), 2);
        assert_eq!(r.delay_fee_on(date(2024, 3, 6)), 20);
    }

    #[test]
    fn test_fee_across_month_boundary() {
        let r = rental(date(2024, 1, 30), 1, 1500);
        assert_eq!(r.delay_fee_on(date(2024, 2, 3)), 3 * 1500);
    }

    #[test]
    fn test_is_open() {
        let mut r = rental(date(2024, 3, 1), 3, 30);
        assert!(r.is_open());
        r.return_date = Some(date(2024, 3, 2));
        assert!(!r.is_open());
    }
}
