//! OpenAPI documentation

use axum::Router;
use utoipa::{openapi::server::Server, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, categories, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Librarium API",
        version = "1.0.0",
        description = "Library catalog REST API: books, categories and copy reservations",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::reserve_book,
        books::return_book,
    ),
    components(
        schemas(
            crate::models::category::Category,
            crate::models::category::CategoryPayload,
            crate::models::book::Book,
            crate::models::book::BookPayload,
            health::HealthResponse,
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Category management"),
        (name = "books", description = "Book catalog and reservations")
    )
)]
pub struct ApiDoc;

/// OpenAPI document whose server URL is the mount path the routes are nested under
pub fn api_doc(mount_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let url = if mount_path.is_empty() { "/" } else { mount_path };
    doc.servers = Some(vec![Server::new(url)]);
    doc
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router(mount_path: &str) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc(mount_path)))
}
