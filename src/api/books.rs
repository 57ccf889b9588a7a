//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{
    extract::{JsonBody, PathParam, QueryParams},
    MessageResponse,
};
use crate::{
    error::AppResult,
    models::{Book, BookFilter, BookPayload, BookQuery},
    AppState,
};

/// List books matching every given filter
#[utoipa::path(
    get,
    path = "/book",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 204, description = "No book matches, empty array", body = Vec<Book>),
        (status = 400, description = "Malformed filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<BookQuery>,
) -> AppResult<(StatusCode, Json<Vec<Book>>)> {
    let filter = BookFilter::try_from(query)?;
    let books = state.services.books.list(&filter).await?;
    let status = if books.is_empty() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::OK
    };
    Ok((status, Json(books)))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Create a book; every copy starts available
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid payload or unknown category", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace a book; availability is reset to the number of copies
#[utoipa::path(
    put,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid payload or unknown category", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(id, payload).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}

/// Reserve one copy of a book
#[utoipa::path(
    post,
    path = "/book/{id}/reserve",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Copy reserved", body = Book),
        (status = 400, description = "No available copies", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn reserve_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.reserve(id).await?;
    Ok(Json(book))
}

/// Return one reserved copy of a book
#[utoipa::path(
    post,
    path = "/book/{id}/return",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Copy returned", body = Book),
        (status = 400, description = "All copies are available", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.return_copy(id).await?;
    Ok(Json(book))
}
