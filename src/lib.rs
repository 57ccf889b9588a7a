//! Librarium Library Catalog
//!
//! A REST JSON API for managing a library catalog: categories, books and
//! the reservation/return bookkeeping of their available copies.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
