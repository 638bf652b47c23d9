use anyhow::Result;
use chrono::NaiveDate;
use shared::RentalStatus;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::domain::commands::{Page, RentalFilter};
use crate::domain::models::{NewRental, Rental, RentalDetails};
use crate::storage::connection::DbConnection;

/// Repository for rental operations.
///
/// The state-changing statements carry their own guards (stock available,
/// rental still open) so that a check made by the caller beforehand cannot be
/// invalidated by a concurrent request between the check and the write.
#[derive(Clone)]
pub struct RentalRepository {
    db: DbConnection,
}

impl RentalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a rental only if the game still has a unit in stock.
    ///
    /// Returns the new id, or `None` when every unit of the game is out on an
    /// open rental (or the game does not exist).
    pub async fn store_rental_if_in_stock(&self, rental: &NewRental) -> Result<Option<i64>> {
        let result = sqlx::query(
            r#"
            INSERT INTO rentals
                (customer_id, game_id, rent_date, days_rented, return_date, original_price, delay_fee)
            SELECT ?, ?, ?, ?, NULL, ?, NULL
            WHERE (SELECT COUNT(*) FROM rentals WHERE game_id = ? AND return_date IS NULL)
                < (SELECT stock_total FROM games WHERE id = ?)
            "#,
        )
        .bind(rental.customer_id)
        .bind(rental.game_id)
        .bind(rental.rent_date)
        .bind(rental.days_rented)
        .bind(rental.original_price)
        .bind(rental.game_id)
        .bind(rental.game_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            Ok(None)
        } else {
            Ok(Some(result.last_insert_rowid()))
        }
    }

    /// Number of rentals of a game that have not been returned yet
    pub async fn count_open_rentals(&self, game_id: i64) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS open_count
            FROM rentals
            WHERE game_id = ? AND return_date IS NULL
            "#,
        )
        .bind(game_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.try_get("open_count")?)
    }

    /// Get a rental by ID
    pub async fn get_rental(&self, rental_id: i64) -> Result<Option<Rental>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, game_id, rent_date, days_rented,
                   return_date, original_price, delay_fee
            FROM rentals
            WHERE id = ?
            "#,
        )
        .bind(rental_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_rental).transpose()?)
    }

    /// Close an open rental.
    /// Returns false when the rental does not exist or was already returned.
    pub async fn mark_returned(&self, rental_id: i64, return_date: NaiveDate, delay_fee: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET return_date = ?, delay_fee = ?
            WHERE id = ? AND return_date IS NULL
            "#,
        )
        .bind(return_date)
        .bind(delay_fee)
        .bind(rental_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a rental that is still open.
    /// Returns false when the rental does not exist or was already returned.
    pub async fn delete_open_rental(&self, rental_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = ? AND return_date IS NULL")
            .bind(rental_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List rentals joined with customer, game and category names
    pub async fn list_rentals(&self, filter: &RentalFilter, page: Page) -> Result<Vec<RentalDetails>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT r.id, r.customer_id, r.game_id, r.rent_date, r.days_rented,
                   r.return_date, r.original_price, r.delay_fee,
                   cu.name AS customer_name,
                   g.name AS game_name,
                   g.category_id,
                   ca.name AS category_name
            FROM rentals r
            JOIN customers cu ON cu.id = r.customer_id
            JOIN games g ON g.id = r.game_id
            JOIN categories ca ON ca.id = g.category_id
            WHERE 1 = 1
            "#,
        );

        if let Some(customer_id) = filter.customer_id {
            query.push(" AND r.customer_id = ").push_bind(customer_id);
        }
        if let Some(game_id) = filter.game_id {
            query.push(" AND r.game_id = ").push_bind(game_id);
        }
        if let Some(start_date) = filter.start_date {
            query.push(" AND r.rent_date >= ").push_bind(start_date);
        }
        match filter.status {
            Some(RentalStatus::Open) => {
                query.push(" AND r.return_date IS NULL");
            }
            Some(RentalStatus::Closed) => {
                query.push(" AND r.return_date IS NOT NULL");
            }
            None => {}
        }

        query
            .push(" ORDER BY r.id ASC LIMIT ")
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.sql_offset());

        let rows = query.build().fetch_all(self.db.pool()).await?;

        let rentals = rows
            .iter()
            .map(|row| -> Result<RentalDetails, sqlx::Error> {
                Ok(RentalDetails {
                    rental: map_rental(row)?,
                    customer_name: row.try_get("customer_name")?,
                    game_name: row.try_get("game_name")?,
                    category_id: row.try_get("category_id")?,
                    category_name: row.try_get("category_name")?,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(rentals)
    }
}

fn map_rental(row: &SqliteRow) -> Result<Rental, sqlx::Error> {
    Ok(Rental {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        game_id: row.try_get("game_id")?,
        rent_date: row.try_get("rent_date")?,
        days_rented: row.try_get("days_rented")?,
        return_date: row.try_get("return_date")?,
        original_price: row.try_get("original_price")?,
        delay_fee: row.try_get("delay_fee")?,
    })
}
