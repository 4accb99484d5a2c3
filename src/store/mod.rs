//! Blog persistence port.
//!
//! Handlers and services only talk to [`BlogStore`]. Two implementations exist:
//! - [`PgBlogStore`]: PostgreSQL via sqlx, used when `DATABASE_URL` is set
//! - [`InMemoryBlogStore`]: process-local, used otherwise and in tests

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::blog::{BlogPost, NewBlogPost};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryBlogStore;
pub use postgres::PgBlogStore;

/// Which posts a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogFilter {
    All,
    PublishedOnly,
}

/// Storage operations for blog posts.
///
/// Listings are ordered newest first. Every operation is independent; there
/// is no cross-call transaction.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Insert a post, assigning `id` and `created_at`.
    async fn insert(&self, blog: NewBlogPost) -> Result<BlogPost, AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<BlogPost>, AppError>;

    async fn list(&self, filter: BlogFilter) -> Result<Vec<BlogPost>, AppError>;

    /// Flip `is_published`. Returns the updated post, or `None` if absent.
    async fn toggle_publish(&self, id: Uuid) -> Result<Option<BlogPost>, AppError>;

    /// Remove a post permanently. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
