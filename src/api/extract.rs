//! Extractors whose rejections render as `{ "message": ... }` with status 400

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Query string parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
