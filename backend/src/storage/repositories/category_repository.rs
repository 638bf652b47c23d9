use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::commands::Page;
use crate::domain::models::{Category, NewCategory};
use crate::storage::connection::DbConnection;

/// Repository for category operations
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a category, returning its new id
    pub async fn store_category(&self, category: &NewCategory) -> Result<i64> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(&category.name)
            .execute(self.db.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get a category by ID
    pub async fn get_category(&self, category_id: i64) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(map_category).transpose()?)
    }

    /// Get a category by its exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.as_ref().map(map_category).transpose()?)
    }

    /// List categories ordered by id
    pub async fn list_categories(&self, page: Page) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(self.db.pool())
        .await?;

        let categories = rows.iter().map(map_category).collect::<Result<_, _>>()?;
        Ok(categories)
    }
}

fn map_category(row: &SqliteRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}
