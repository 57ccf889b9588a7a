//! Business logic services

pub mod books;
pub mod categories;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub categories: categories::CategoriesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository),
        }
    }
}
