//! Book model, request payloads and list filters

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::category::Category;
use crate::error::AppError;

/// Book record with its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: String,
    pub publication_year: i32,
    /// Total owned copies
    pub copies: i32,
    /// Copies not currently reserved (0 <= available_copies <= copies)
    pub available_copies: i32,
    pub category_id: i32,
    pub category: Category,
}

/// Flat row of `books JOIN categories`
#[derive(Debug, FromRow)]
pub struct BookRow {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: String,
    pub publication_year: i32,
    pub copies: i32,
    pub available_copies: i32,
    pub category_id: i32,
    pub category_name: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            description: row.description,
            publication_year: row.publication_year,
            copies: row.copies,
            available_copies: row.available_copies,
            category_id: row.category_id,
            category: Category {
                id: row.category_id,
                name: row.category_name,
            },
        }
    }
}

/// Create/update book request. Updates replace the whole record.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[validate(length(min = 1, message = "title is a required field"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is a required field"))]
    pub author: String,
    #[validate(length(min = 1, message = "description is a required field"))]
    pub description: String,
    /// Must not be later than the current year
    pub publication_year: i32,
    #[validate(range(min = 0, message = "copies must be greater than or equal to 0"))]
    pub copies: i32,
    /// Accepted but ignored: availability is always reset to `copies`
    #[serde(default)]
    pub available_copies: Option<i32>,
    pub category_id: i32,
}

/// Book data that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub publication_year: i32,
    pub copies: i32,
    pub category_id: i32,
}

/// Raw `GET /book` query string
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Substring of the title
    pub title: Option<String>,
    /// Substring of the author
    pub author: Option<String>,
    /// Substring of the description
    pub description: Option<String>,
    /// Exact publication year
    pub publication_year: Option<String>,
    /// Category id, or a substring of the category name
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    Id(i32),
    Name(String),
}

/// Parsed book list filters; every present filter must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Option<CategoryFilter>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Integer at the start of `value` after leading whitespace, with an optional
/// sign. Trailing characters are ignored, so `"12abc"` reads as 12.
fn leading_integer(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let unsigned = trimmed.trim_start_matches(|c: char| c == '+' || c == '-');
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

impl TryFrom<BookQuery> for BookFilter {
    type Error = AppError;

    fn try_from(query: BookQuery) -> Result<Self, Self::Error> {
        let publication_year = match non_empty(query.publication_year) {
            Some(year) => Some(leading_integer(&year).ok_or_else(|| {
                AppError::Validation(format!("publicationYear must be an integer, got '{}'", year))
            })?),
            None => None,
        };

        let category = non_empty(query.category).map(|c| match leading_integer(&c) {
            Some(id) => CategoryFilter::Id(id),
            None => CategoryFilter::Name(c),
        });

        Ok(Self {
            title: non_empty(query.title),
            author: non_empty(query.author),
            description: non_empty(query.description),
            publication_year,
            category,
        })
    }
}
