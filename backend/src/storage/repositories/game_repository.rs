use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::commands::Page;
use crate::domain::models::{Game, GameWithCategory, NewGame};
use crate::storage::connection::DbConnection;
use crate::storage::like_prefix;

/// Repository for game operations
#[derive(Clone)]
pub struct GameRepository {
    db: DbConnection,
}

impl GameRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a game, returning its new id
    pub async fn store_game(&self, game: &NewGame) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO games (name, name_search, image, stock_total, category_id, price_per_day)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&game.name)
        .bind(game.name.to_lowercase())
        .bind(game.image.as_deref())
        .bind(game.stock_total)
        .bind(game.category_id)
        .bind(game.price_per_day)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get a game by ID
    pub async fn get_game(&self, game_id: i64) -> Result<Option<Game>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, image, stock_total, category_id, price_per_day
            FROM games
            WHERE id = ?
            "#,
        )
        .bind(game_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_game).transpose()?)
    }

    /// Get a game by its exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Game>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, image, stock_total, category_id, price_per_day
            FROM games
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_game).transpose()?)
    }

    /// List games with their category name, optionally restricted to names
    /// starting with `name_prefix` (case-insensitive).
    ///
    /// SQLite only folds ASCII case, so the prefix is lowercased here and
    /// matched against `name_search`, which holds the lowercased name.
    pub async fn list_games(&self, name_prefix: Option<&str>, page: Page) -> Result<Vec<GameWithCategory>> {
        let pattern = name_prefix.map(|prefix| like_prefix(&prefix.to_lowercase()));

        let rows = sqlx::query(
            r#"
            SELECT g.id, g.name, g.image, g.stock_total, g.category_id, g.price_per_day,
                   c.name AS category_name
            FROM games g
            JOIN categories c ON c.id = g.category_id
            WHERE (? IS NULL OR g.name_search LIKE ? ESCAPE '\')
            ORDER BY g.id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pattern.as_deref())
        .bind(pattern.as_deref())
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(self.db.pool())
        .await?;

        let games = rows
            .iter()
            .map(|row| -> Result<GameWithCategory, sqlx::Error> {
                Ok(GameWithCategory {
                    game: map_game(row)?,
                    category_name: row.try_get("category_name")?,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(games)
    }
}

fn map_game(row: &SqliteRow) -> Result<Game, sqlx::Error> {
    Ok(Game {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        image: row.try_get("image")?,
        stock_total: row.try_get("stock_total")?,
        category_id: row.try_get("category_id")?,
        price_per_day: row.try_get("price_per_day")?,
    })
}
