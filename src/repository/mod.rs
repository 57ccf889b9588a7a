//! Repository layer for database operations
//!
//! Services only see the [`BookStore`] and [`CategoryStore`] traits; the
//! Postgres implementations live in [`books`] and [`categories`].

pub mod books;
pub mod categories;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, Category, NewBook, NewCategory},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Category>>;

    async fn get(&self, id: i32) -> AppResult<Option<Category>>;

    /// Insert unless the name is taken. `None` means the name already exists.
    async fn create(&self, data: &NewCategory) -> AppResult<Option<Category>>;

    /// `None` when no category has this id
    async fn update(&self, id: i32, data: &NewCategory) -> AppResult<Option<Category>>;

    /// `false` when no category has this id
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    async fn get(&self, id: i32) -> AppResult<Option<Book>>;

    /// Insert with `available_copies = copies`
    async fn create(&self, data: &NewBook) -> AppResult<Book>;

    /// Replace every field and reset `available_copies` to `copies`
    async fn update(&self, id: i32, data: &NewBook) -> AppResult<Option<Book>>;

    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Take one copy in a single guarded statement.
    /// `None` when the book does not exist or has no available copy.
    async fn reserve(&self, id: i32) -> AppResult<Option<Book>>;

    /// Give one copy back in a single guarded statement.
    /// `None` when the book does not exist or all copies are already available.
    async fn release(&self, id: i32) -> AppResult<Option<Book>>;
}

/// Main repository struct holding the storage handles
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub categories: Arc<dyn CategoryStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            categories: Arc::new(categories::CategoriesRepository::new(pool)),
        }
    }

    /// Build a repository over arbitrary stores
    pub fn with_stores(books: Arc<dyn BookStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self { books, categories }
    }
}

pub(crate) fn duplicate_category() -> AppError {
    AppError::BadRequest("Category already exists".to_string())
}

pub(crate) fn unknown_category(id: i32) -> AppError {
    AppError::BadRequest(format!("Category {} does not exist", id))
}

pub(crate) fn category_in_use(id: i32) -> AppError {
    AppError::BadRequest(format!("Category {} is still referenced by books", id))
}

/// Escape `%`, `_` and `\` and wrap the value for a `LIKE` substring match
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
