//! Request, response and domain data structures.

/// Admin login model
pub mod admin;
/// Blog post model
pub mod blog;
