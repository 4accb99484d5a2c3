//! Request extractors whose rejections use the application error format.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json<T>` that rejects malformed bodies with a `{success: false, message}` 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
