//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle validation and talk to storage and external services.

pub mod admin_service;
pub mod blog_service;
pub mod content_generator;
pub mod image_store;
pub mod token_service;
