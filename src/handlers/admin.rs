//! Admin HTTP handlers.
//!
//! - POST /api/admin/login - Exchange admin credentials for a bearer token (public)
//! - GET /api/admin/blogs - Every post including drafts (authenticated)

use axum::{Extension, Json, extract::State};

use crate::{
    error::AppError,
    extract::ApiJson,
    middleware::auth::AuthContext,
    models::{
        admin::{LoginRequest, LoginResponse},
        blog::BlogListResponse,
    },
    services::blog_service,
    state::AppState,
};

/// Admin login.
///
/// # Response
///
/// - **Success (200)**: `{"success": true, "token": "<jwt>"}`
/// - **Error (401)**: `{"success": false, "message": "Invalid credentials"}`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state
        .admin
        .login(&state.tokens, &request.email, &request.password)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// List every post for the admin dashboard, newest first.
pub async fn list_all_blogs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<BlogListResponse>, AppError> {
    let blogs = blog_service::list_all(state.blogs.as_ref()).await?;
    tracing::debug!(admin = %auth.subject, count = blogs.len(), "Admin listed blogs");

    Ok(Json(BlogListResponse {
        success: true,
        blogs,
    }))
}
