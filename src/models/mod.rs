//! Data models for Librarium

pub mod book;
pub mod category;

pub use book::{Book, BookFilter, BookPayload, BookQuery, CategoryFilter, NewBook};
pub use category::{Category, CategoryPayload, NewCategory};
