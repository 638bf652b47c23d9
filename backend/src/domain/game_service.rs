use shared::CreateGameRequest;
use tracing::{info, warn};

use crate::domain::commands::Page;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Game, GameWithCategory};
use crate::domain::validation::validate_game;
use crate::storage::{is_unique_violation, CategoryRepository, DbConnection, GameRepository};

/// Service for managing the game catalogue
#[derive(Clone)]
pub struct GameService {
    games: GameRepository,
    categories: CategoryRepository,
}

impl GameService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            games: GameRepository::new(db.clone()),
            categories: CategoryRepository::new(db),
        }
    }

    /// List games, optionally only those whose name starts with `name_prefix`
    pub async fn list_games(&self, name_prefix: Option<&str>, page: Page) -> DomainResult<Vec<GameWithCategory>> {
        let games = self.games.list_games(name_prefix, page).await?;
        info!("Found {} games", games.len());
        Ok(games)
    }

    /// Create a game in an existing category
    pub async fn create_game(&self, request: CreateGameRequest) -> DomainResult<Game> {
        let new_game = validate_game(&request)?;

        if self.categories.get_category(new_game.category_id).await?.is_none() {
            warn!("Game references unknown category {}", new_game.category_id);
            return Err(DomainError::BadReference(format!(
                "Category {} does not exist",
                new_game.category_id
            )));
        }

        if self.games.find_by_name(&new_game.name).await?.is_some() {
            warn!("Game name already taken: {}", new_game.name);
            return Err(duplicate_name(&new_game.name));
        }

        let id = match self.games.store_game(&new_game).await {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_name(&new_game.name)),
            Err(e) => return Err(e.into()),
        };

        info!("Created game: {} with ID: {}", new_game.name, id);
        Ok(Game {
            id,
            name: new_game.name,
            image: new_game.image,
            stock_total: new_game.stock_total,
            category_id: new_game.category_id,
            price_per_day: new_game.price_per_day,
        })
    }
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::Conflict(format!("Game '{}' already exists", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryService;
    use shared::CreateCategoryRequest;

    async fn setup_test() -> (GameService, i64) {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let category = CategoryService::new(db.clone())
            .create_category(CreateCategoryRequest { name: Some("Strategy".to_string()) })
            .await
            .expect("Failed to create category");
        (GameService::new(db), category.id)
    }

    fn request(name: &str, category_id: i64, stock_total: i64, price_per_day: i64) -> CreateGameRequest {
        CreateGameRequest {
            name: Some(name.to_string()),
            image: Some("http://image.png".to_string()),
            stock_total: Some(stock_total),
            category_id: Some(category_id),
            price_per_day: Some(price_per_day),
        }
    }

    #[tokio::test]
    async fn test_create_game() {
        let (service, category_id) = setup_test().await;

        let game = service
            .create_game(request("Banco Imobiliário", category_id, 3, 1500))
            .await
            .expect("Failed to create game");
        assert_eq!(game.name, "Banco Imobiliário");

        let games = service.list_games(None, Page::default()).await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].category_name, "Strategy");
    }

    #[tokio::test]
    async fn test_unknown_category_is_bad_reference() {
        let (service, category_id) = setup_test().await;

        let result = service.create_game(request("Catan", category_id + 100, 3, 1500)).await;
        assert!(matches!(result, Err(DomainError::BadReference(_))));
        assert!(service.list_games(None, Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let (service, category_id) = setup_test().await;
        service.create_game(request("Catan", category_id, 3, 1500)).await.unwrap();

        let result = service.create_game(request(" Catan ", category_id, 1, 100)).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_non_positive_values_create_nothing() {
        let (service, category_id) = setup_test().await;

        for (stock, price) in [(0, 1500), (-2, 1500), (3, 0), (3, -10)] {
            let result = service.create_game(request("Catan", category_id, stock, price)).await;
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
        assert!(service.list_games(None, Page::default()).await.unwrap().is_empty());
    }
}
