//! API handlers for Librarium REST endpoints

pub mod books;
pub mod categories;
pub mod extract;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mount_path = state.config.server.mount_path.trim_end_matches('/').to_string();

    let catalog = Router::new()
        .route("/health", get(health::health_check))
        // Categories
        .route(
            "/category",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/category/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Books
        .route("/book", get(books::list_books).post(books::create_book))
        .route(
            "/book/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/book/:id/reserve", post(books::reserve_book))
        .route("/book/:id/return", post(books::return_book))
        .with_state(state);

    let router = if mount_path.is_empty() {
        Router::new().merge(catalog)
    } else {
        Router::new().nest(&mount_path, catalog)
    };

    router
        .merge(openapi::create_openapi_router(&mount_path))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
