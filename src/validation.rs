//! Payload normalization and validation.
//!
//! Strings are trimmed before the `validator` rules run, so a title made of
//! whitespace only is rejected like an empty one. All violations are reported
//! together in a single [`AppError::Validation`].

use chrono::{Datelike, Utc};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{BookPayload, CategoryPayload, NewBook, NewCategory},
};

/// Current calendar year (UTC), the upper bound for `publicationYear`
pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn validate_book(payload: BookPayload) -> AppResult<NewBook> {
    validate_book_at(payload, current_year())
}

fn validate_book_at(mut payload: BookPayload, max_year: i32) -> AppResult<NewBook> {
    payload.title = payload.title.trim().to_string();
    payload.author = payload.author.trim().to_string();
    payload.description = payload.description.trim().to_string();

    let mut errors = payload.validate().err().unwrap_or_else(ValidationErrors::new);
    if payload.publication_year > max_year {
        let mut error = ValidationError::new("max");
        error.message = Some(
            format!("publicationYear must be less than or equal to {}", max_year).into(),
        );
        errors.add("publicationYear", error);
    }
    if !errors.errors().is_empty() {
        return Err(AppError::from(errors));
    }

    Ok(NewBook {
        title: payload.title,
        author: payload.author,
        description: payload.description,
        publication_year: payload.publication_year,
        copies: payload.copies,
        category_id: payload.category_id,
    })
}

pub fn validate_category(mut payload: CategoryPayload) -> AppResult<NewCategory> {
    payload.name = payload.name.trim().to_string();
    payload.validate()?;
    Ok(NewCategory { name: payload.name })
}
