use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::commands::Page;
use crate::domain::models::{Customer, CustomerFields};
use crate::storage::connection::DbConnection;
use crate::storage::like_prefix;

/// Repository for customer operations
#[derive(Clone)]
pub struct CustomerRepository {
    db: DbConnection,
}

impl CustomerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a customer, returning its new id
    pub async fn store_customer(&self, customer: &CustomerFields) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, phone, cpf, birthday)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.cpf)
        .bind(customer.birthday)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, phone, cpf, birthday
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(customer_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_customer).transpose()?)
    }

    /// Get the customer holding `cpf`
    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, phone, cpf, birthday
            FROM customers
            WHERE cpf = ?
            "#,
        )
        .bind(cpf)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_customer).transpose()?)
    }

    /// List customers, optionally restricted to cpfs starting with `cpf_prefix`
    pub async fn list_customers(&self, cpf_prefix: Option<&str>, page: Page) -> Result<Vec<Customer>> {
        let pattern = cpf_prefix.map(like_prefix);

        let rows = sqlx::query(
            r#"
            SELECT id, name, phone, cpf, birthday
            FROM customers
            WHERE (? IS NULL OR cpf LIKE ? ESCAPE '\')
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pattern.as_deref())
        .bind(pattern.as_deref())
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(self.db.pool())
        .await?;

        let customers = rows.iter().map(map_customer).collect::<Result<_, _>>()?;
        Ok(customers)
    }

    /// Overwrite every field of a customer.
    /// Returns false when no customer has that id.
    pub async fn update_customer(&self, customer_id: i64, customer: &CustomerFields) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = ?, phone = ?, cpf = ?, birthday = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.cpf)
        .bind(customer.birthday)
        .bind(customer_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_customer(row: &SqliteRow) -> Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        cpf: row.try_get("cpf")?,
        birthday: row.try_get("birthday")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::is_unique_violation;
    use chrono::NaiveDate;

    async fn setup_test() -> CustomerRepository {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        CustomerRepository::new(db)
    }

    fn fields(name: &str, cpf: &str) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            phone: "21998899222".to_string(),
            cpf: cpf.to_string(),
            birthday: NaiveDate::from_ymd_opt(1992, 10, 5).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_customer() {
        let repo = setup_test().await;

        let id = repo.store_customer(&fields("João Alfredo", "01234567890")).await.expect("Failed to store customer");

        let customer = repo.get_customer(id).await.expect("Failed to get customer").expect("Customer should exist");
        assert_eq!(customer.name, "João Alfredo");
        assert_eq!(customer.cpf, "01234567890");
        assert_eq!(customer.birthday, NaiveDate::from_ymd_opt(1992, 10, 5).unwrap());
    }

    #[tokio::test]
    async fn test_birthday_is_stored_as_iso_date() {
        let repo = setup_test().await;
        let id = repo.store_customer(&fields("João", "01234567890")).await.expect("Failed to store customer");

        let raw: String = sqlx::query("SELECT birthday FROM customers WHERE id = ?")
            .bind(id)
            .fetch_one(repo.db.pool())
            .await
            .expect("Failed to read row")
            .get("birthday");
        assert_eq!(raw, "1992-10-05");
    }

    #[tokio::test]
    async fn test_duplicate_cpf_is_unique_violation() {
        let repo = setup_test().await;
        repo.store_customer(&fields("João", "01234567890")).await.expect("Failed to store customer");

        let error = repo.store_customer(&fields("Maria", "01234567890")).await.unwrap_err();
        assert!(is_unique_violation(&error));
    }

    #[tokio::test]
    async fn test_list_customers_by_cpf_prefix() {
        let repo = setup_test().await;
        repo.store_customer(&fields("A", "12300000000")).await.unwrap();
        repo.store_customer(&fields("B", "12311111111")).await.unwrap();
        repo.store_customer(&fields("C", "99900000000")).await.unwrap();

        let customers = repo.list_customers(Some("123"), Page::default()).await.expect("Failed to list");
        let names: Vec<_> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        let everyone = repo.list_customers(None, Page::default()).await.expect("Failed to list");
        assert_eq!(everyone.len(), 3);
    }

    #[tokio::test]
    async fn test_update_customer() {
        let repo = setup_test().await;
        let id = repo.store_customer(&fields("Old", "01234567890")).await.unwrap();

        let updated = repo.update_customer(id, &fields("New", "09876543210")).await.expect("Failed to update");
        assert!(updated);

        let customer = repo.get_customer(id).await.unwrap().unwrap();
        assert_eq!(customer.name, "New");
        assert_eq!(customer.cpf, "09876543210");
    }

    #[tokio::test]
    async fn test_update_nonexistent_customer() {
        let repo = setup_test().await;
        let updated = repo.update_customer(7, &fields("Ghost", "01234567890")).await.expect("Query failed");
        assert!(!updated);
    }
}
