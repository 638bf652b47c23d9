use shared::CreateCategoryRequest;
use tracing::{info, warn};

use crate::domain::commands::Page;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Category;
use crate::domain::validation::validate_category;
use crate::storage::{is_unique_violation, CategoryRepository, DbConnection};

/// Service for managing game categories
#[derive(Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
}

impl CategoryService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            categories: CategoryRepository::new(db),
        }
    }

    pub async fn list_categories(&self, page: Page) -> DomainResult<Vec<Category>> {
        let categories = self.categories.list_categories(page).await?;
        info!("Found {} categories", categories.len());
        Ok(categories)
    }

    /// Create a category with a unique, trimmed name
    pub async fn create_category(&self, request: CreateCategoryRequest) -> DomainResult<Category> {
        let new_category = validate_category(&request)?;

        if self.categories.find_by_name(&new_category.name).await?.is_some() {
            warn!("Category name already taken: {}", new_category.name);
            return Err(duplicate_name(&new_category.name));
        }

        let id = match self.categories.store_category(&new_category).await {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => return Err(duplicate_name(&new_category.name)),
            Err(e) => return Err(e.into()),
        };

        info!("Created category: {} with ID: {}", new_category.name, id);
        Ok(Category {
            id,
            name: new_category.name,
        })
    }
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::Conflict(format!("Category '{}' already exists", name))
}
