//! Category endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{
    extract::{JsonBody, PathParam},
    MessageResponse,
};
use crate::{
    error::AppResult,
    models::{Category, CategoryPayload},
    AppState,
};

/// List all categories
#[utoipa::path(
    get,
    path = "/category",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/category/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.get(id).await?;
    Ok(Json(category))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/category",
    tag = "categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid payload or name already taken", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.services.categories.create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/category/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, description = "Invalid payload or name already taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<CategoryPayload>,
) -> AppResult<Json<Category>> {
    let category = state.services.categories.update(id, payload).await?;
    Ok(Json(category))
}

/// Delete a category no book refers to
#[utoipa::path(
    delete,
    path = "/category/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Category still has books", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.categories.delete(id).await?;
    Ok(Json(MessageResponse {
        message: format!("Category {} deleted", id),
    }))
}
