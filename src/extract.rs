//! Request extractors that report bad input as `ApiError`
//!
//! axum's own `Json`, `Path` and `Query` answer malformed input with plain
//! text and, for bodies of the wrong shape, 422. These wrappers run the same
//! extraction but turn any rejection into a 400 `{"message": ...}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
