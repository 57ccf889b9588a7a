//! Book catalog service: CRUD plus reservation bookkeeping

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookFilter, BookPayload},
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books; an empty result is not an error
    pub async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        self.repository.books.list(filter).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get(id).await?.ok_or_else(not_found)
    }

    /// Create a book with every copy available
    pub async fn create(&self, payload: BookPayload) -> AppResult<Book> {
        let data = validation::validate_book(payload)?;
        let book = self.repository.books.create(&data).await?;
        tracing::info!(book_id = book.id, title = %book.title, copies = book.copies, "Book created");
        Ok(book)
    }

    /// Replace a book. Availability is reset to `copies`, dropping outstanding reservations.
    pub async fn update(&self, id: i32, payload: BookPayload) -> AppResult<Book> {
        self.get(id).await?;
        let data = validation::validate_book(payload)?;
        let book = self
            .repository
            .books
            .update(id, &data)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(book_id = id, copies = book.copies, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(not_found());
        }
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Take one copy of a book
    pub async fn reserve(&self, id: i32) -> AppResult<Book> {
        if let Some(book) = self.repository.books.reserve(id).await? {
            tracing::info!(book_id = id, available = book.available_copies, "Copy reserved");
            return Ok(book);
        }

        // Nothing was updated: either the book is missing or no copy is left.
        self.get(id).await?;
        tracing::debug!(book_id = id, "Reservation refused, no available copies");
        Err(AppError::BadRequest("No available copies".to_string()))
    }

    /// Give one copy of a book back
    pub async fn return_copy(&self, id: i32) -> AppResult<Book> {
        if let Some(book) = self.repository.books.release(id).await? {
            tracing::info!(book_id = id, available = book.available_copies, "Copy returned");
            return Ok(book);
        }

        self.get(id).await?;
        tracing::debug!(book_id = id, "Return refused, all copies already available");
        Err(AppError::BadRequest("All copies are available".to_string()))
    }
}
