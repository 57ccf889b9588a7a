//! Category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Category record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    /// Unique display name
    pub name: String,
}

/// Create/update category request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "name is a required field"))]
    pub name: String,
}

/// Category data that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}
