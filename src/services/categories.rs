//! Category management service

use crate::{
    error::{AppError, AppResult},
    models::{Category, CategoryPayload},
    repository::{duplicate_category, Repository},
    validation,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Category> {
        self.repository
            .categories
            .get(id)
            .await?
            .ok_or_else(not_found)
    }

    /// Create a category; names are unique
    pub async fn create(&self, payload: CategoryPayload) -> AppResult<Category> {
        let data = validation::validate_category(payload)?;
        match self.repository.categories.create(&data).await? {
            Some(category) => {
                tracing::info!(category_id = category.id, name = %category.name, "Category created");
                Ok(category)
            }
            None => {
                tracing::debug!(name = %data.name, "Category name already taken");
                Err(duplicate_category())
            }
        }
    }

    pub async fn update(&self, id: i32, payload: CategoryPayload) -> AppResult<Category> {
        self.get(id).await?;
        let data = validation::validate_category(payload)?;
        let category = self
            .repository
            .categories
            .update(id, &data)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(category_id = id, name = %category.name, "Category updated");
        Ok(category)
    }

    /// Delete a category that no book references
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repository.categories.delete(id).await? {
            return Err(not_found());
        }
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }
}
