//! Blog CMS server library.
//!
//! Exposes the router, state and client so the binary and the integration
//! tests share one wiring.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use std::path::PathBuf;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use error::AppError;
pub use state::AppState;

/// HTTP-level settings that are not part of the shared state.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Request body limit, sized for image uploads
    pub max_upload_bytes: usize,

    /// Directory served under `/uploads`, when images are stored on disk
    pub upload_dir: Option<PathBuf>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 5 * 1024 * 1024,
            upload_dir: None,
        }
    }
}

/// Build the application router.
///
/// Public routes: health, published listing, single post, admin login and
/// uploaded images. Every other route sits behind the bearer token gate.
pub fn build_router(state: AppState, config: &RouterConfig) -> Router {
    let authenticated_routes = Router::new()
        .route("/api/blog/add", post(handlers::blog::add_blog))
        .route("/api/blog/delete", post(handlers::blog::delete_blog))
        .route(
            "/api/blog/toggle-publish",
            post(handlers::blog::toggle_publish),
        )
        .route("/api/blog/generate", post(handlers::blog::generate_content))
        .route("/api/admin/blogs", get(handlers::admin::list_all_blogs))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let mut app = Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/api/blog/all", get(handlers::blog::list_blogs))
        .route("/api/blog/{id}", get(handlers::blog::get_blog))
        .route("/api/admin/login", post(handlers::admin::login))
        .merge(authenticated_routes);

    if let Some(dir) = &config.upload_dir {
        app = app.nest_service(services::image_store::PUBLIC_PREFIX, ServeDir::new(dir));
    }

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
