//! Blog CMS Server - Main Application Entry Point
//!
//! REST API backing the blog admin UI: create, publish/unpublish and delete
//! blog posts, with optional AI-assisted content generation.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: PostgreSQL with sqlx, or in-memory when no database is configured
//! - **Authentication**: JWT bearer tokens verified with a server-held HMAC secret
//! - **Format**: JSON requests/responses, multipart for image upload
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Connect to the database and run migrations (when `DATABASE_URL` is set)
//! 3. Build shared state and the HTTP router
//! 4. Start server on configured port

use std::path::PathBuf;
use std::sync::Arc;

use blog_cms_server::{
    AppState, RouterConfig, build_router, config, db,
    services::image_store::DiskImageStore,
    store::{BlogStore, InMemoryBlogStore, PgBlogStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::debug!(?config);

    let blogs: Arc<dyn BlogStore> = match &config.database_url {
        Some(url) => Arc::new(PgBlogStore::new(db::connect(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory blog store");
            Arc::new(InMemoryBlogStore::new())
        }
    };

    let upload_dir = PathBuf::from(&config.upload_dir);
    let images = Arc::new(DiskImageStore::new(&upload_dir));

    let state = AppState::from_config(&config, blogs, images)?;
    let app = build_router(
        state,
        &RouterConfig {
            max_upload_bytes: config.max_upload_bytes,
            upload_dir: Some(upload_dir),
        },
    );

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
