//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, multipart form, URL params)
//! 2. Calls into the service layer
//! 3. Returns a `{success, ...}` JSON response or an `AppError`

/// Admin login and admin-only listing
pub mod admin;
/// Blog post endpoints
pub mod blog;
/// Service health endpoint
pub mod health;
