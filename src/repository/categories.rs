//! Categories repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{category_in_use, duplicate_category, CategoryStore};
use crate::{
    error::{AppError, AppResult},
    models::{Category, NewCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for CategoriesRepository {
    /// List all categories
    async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// The UNIQUE index on `name` decides; no row comes back when it already exists
    async fn create(&self, data: &NewCategory) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name
            "#,
        )
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &NewCategory) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&data.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => duplicate_category(),
            other => AppError::Database(other),
        })
    }

    /// Books restrict deletion through their foreign key
    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    category_in_use(id)
                }
                other => AppError::Database(other),
            })?;
        Ok(result.rows_affected() > 0)
    }
}
