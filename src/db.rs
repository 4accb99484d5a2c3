//! PostgreSQL pool for the blog store.
//!
//! The pool is only built when `DATABASE_URL` is set. The schema lives in
//! `migrations/` and is applied at startup before any request is served.

use std::time::Duration;

use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

pub type DbPool = Pool<Postgres>;

/// Open a pool of at most 5 connections.
///
/// Requests wait up to 5 seconds for a free connection before failing with
/// a database error.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Create or upgrade the `blogs` table. Applied migrations are recorded in
/// `_sqlx_migrations` and skipped on later starts.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Pool with the schema in place, ready for [`crate::store::PgBlogStore`].
pub async fn connect(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = create_pool(database_url).await?;
    tracing::info!("Database pool created");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    Ok(pool)
}
