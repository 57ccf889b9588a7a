//! Books repository for database operations.
//!
//! Every statement returns the book joined with its category. Writes run as a
//! data-modifying CTE so the join happens in the same round trip.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{contains_pattern, unknown_category, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::{book::BookRow, Book, BookFilter, CategoryFilter, NewBook},
};

const BOOK_COLUMNS: &str = r#"
    b.id, b.title, b.author, b.description, b.publication_year,
    b.copies, b.available_copies, b.category_id, c.name AS category_name
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Wrap an `INSERT/UPDATE ... RETURNING *` so the written row comes back joined with its category
fn joined_with_category(statement: &str) -> String {
    format!(
        "WITH written AS ({}) SELECT {} FROM written b JOIN categories c ON c.id = b.category_id",
        statement, BOOK_COLUMNS
    )
}

fn map_write_error(err: sqlx::Error, category_id: i32) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_foreign_key_violation() {
            return unknown_category(category_id);
        }
        if db.is_check_violation() {
            return AppError::BadRequest(db.message().to_string());
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl BookStore for BooksRepository {
    /// List books matching every present filter
    async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        builder.push(BOOK_COLUMNS);
        builder.push(" FROM books b JOIN categories c ON c.id = b.category_id WHERE 1=1");

        if let Some(ref title) = filter.title {
            builder.push(" AND b.title LIKE ").push_bind(contains_pattern(title));
        }
        if let Some(ref author) = filter.author {
            builder.push(" AND b.author LIKE ").push_bind(contains_pattern(author));
        }
        if let Some(ref description) = filter.description {
            builder
                .push(" AND b.description LIKE ")
                .push_bind(contains_pattern(description));
        }
        if let Some(year) = filter.publication_year {
            builder.push(" AND b.publication_year = ").push_bind(year);
        }
        match filter.category {
            Some(CategoryFilter::Id(id)) => {
                builder.push(" AND b.category_id = ").push_bind(id);
            }
            Some(CategoryFilter::Name(ref name)) => {
                builder.push(" AND c.name LIKE ").push_bind(contains_pattern(name));
            }
            None => {}
        }
        builder.push(" ORDER BY b.id");

        let rows = builder
            .build_query_as::<BookRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!(
            "SELECT {} FROM books b JOIN categories c ON c.id = b.category_id WHERE b.id = $1",
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let query = joined_with_category(
            r#"
            INSERT INTO books (title, author, description, publication_year,
                               copies, available_copies, category_id)
            VALUES ($1, $2, $3, $4, $5, $5, $6)
            RETURNING *
            "#,
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(&data.title)
            .bind(&data.author)
            .bind(&data.description)
            .bind(data.publication_year)
            .bind(data.copies)
            .bind(data.category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, data.category_id))?;
        Ok(Book::from(row))
    }

    async fn update(&self, id: i32, data: &NewBook) -> AppResult<Option<Book>> {
        // Outstanding reservations are discarded: availability restarts at full stock.
        let query = joined_with_category(
            r#"
            UPDATE books
            SET title = $2, author = $3, description = $4, publication_year = $5,
                copies = $6, available_copies = $6, category_id = $7
            WHERE id = $1
            RETURNING *
            "#,
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .bind(&data.title)
            .bind(&data.author)
            .bind(&data.description)
            .bind(data.publication_year)
            .bind(data.copies)
            .bind(data.category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, data.category_id))?;
        Ok(row.map(Book::from))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn reserve(&self, id: i32) -> AppResult<Option<Book>> {
        let query = joined_with_category(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE id = $1 AND available_copies > 0
            RETURNING *
            "#,
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    async fn release(&self, id: i32) -> AppResult<Option<Book>> {
        let query = joined_with_category(
            r#"
            UPDATE books
            SET available_copies = available_copies + 1
            WHERE id = $1 AND available_copies < copies
            RETURNING *
            "#,
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }
}
