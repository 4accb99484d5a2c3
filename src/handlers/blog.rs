//! Blog HTTP handlers.
//!
//! This module implements the blog API endpoints:
//! - POST /api/blog/add - Create a post (multipart, authenticated)
//! - POST /api/blog/delete - Delete a post (authenticated)
//! - POST /api/blog/toggle-publish - Publish/unpublish a post (authenticated)
//! - POST /api/blog/generate - AI content generation (authenticated)
//! - GET /api/blog/all - Published posts (public)
//! - GET /api/blog/:id - A single published post (public)

use axum::{
    Extension, Json,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    extract::ApiJson,
    middleware::auth::AuthContext,
    models::blog::{
        BlogCreatedResponse, BlogIdRequest, BlogListResponse, BlogResponse, GenerateRequest,
        GeneratedContentResponse, MessageResponse, PublishToggledResponse, parse_blog_id,
    },
    services::{blog_service, image_store::ImageUpload},
    state::AppState,
};

/// The two parts of the create form.
#[derive(Default)]
struct BlogForm {
    blog: Option<String>,
    image: Option<ImageUpload>,
}

/// Read the `blog` and `image` fields; unknown fields are skipped.
async fn read_blog_form(mut multipart: Multipart) -> Result<BlogForm, AppError> {
    let mut form = BlogForm::default();
    let malformed = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge("Image too large".to_string());
        }
        tracing::debug!("Malformed multipart body: {}", e);
        AppError::Validation("Invalid multipart form".to_string())
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("blog") => form.blog = Some(field.text().await.map_err(malformed)?),
            Some("image") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Create a new blog post.
///
/// # Endpoint
///
/// `POST /api/blog/add`
///
/// # Request Body
///
/// `multipart/form-data` with:
/// - `blog`: JSON string `{"title", "subTitle", "description", "category", "isPublished"}`
/// - `image`: the cover image file
///
/// # Response
///
/// - **Success (201 Created)**:
///   `{"success": true, "message": "Blog added successfully", "id": "..."}`
/// - **Error (400)**: missing fields, invalid JSON/category, non-image upload
/// - **Error (413)**: body larger than `MAX_UPLOAD_BYTES`
/// - **Error (401)**: missing or invalid token
pub async fn add_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let form = read_blog_form(multipart?).await?;

    let post = blog_service::create_blog(
        state.blogs.as_ref(),
        state.images.as_ref(),
        form.blog,
        form.image,
    )
    .await?;

    tracing::info!(admin = %auth.subject, blog_id = %post.id, category = %post.category, "Blog added");

    Ok((
        StatusCode::CREATED,
        Json(BlogCreatedResponse {
            success: true,
            message: "Blog added successfully".to_string(),
            id: post.id,
        }),
    ))
}

/// Permanently delete a blog post.
///
/// # Request Body
///
/// ```json
/// { "id": "550e8400-e29b-41d4-a716-446655440000" }
/// ```
///
/// # Response
///
/// - **Success (200)**: `{"success": true, "message": "Blog deleted successfully"}`
/// - **Error (404)**: no such post, including a repeated delete
pub async fn delete_blog(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(request): ApiJson<BlogIdRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = request.blog_id()?;
    blog_service::delete_blog(state.blogs.as_ref(), id).await?;

    tracing::info!(admin = %auth.subject, blog_id = %id, "Blog deleted");
    Ok(Json(MessageResponse::ok("Blog deleted successfully")))
}

/// Flip the published flag of a blog post.
///
/// # Response
///
/// - **Success (200)**: `{"success": true, "message": "Blog status updated", "isPublished": true}`
/// - **Error (404)**: no such post
pub async fn toggle_publish(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(request): ApiJson<BlogIdRequest>,
) -> Result<Json<PublishToggledResponse>, AppError> {
    let id = request.blog_id()?;
    let post = blog_service::toggle_publish(state.blogs.as_ref(), id).await?;

    tracing::debug!(admin = %auth.subject, blog_id = %id, "Publish toggled by admin");
    Ok(Json(PublishToggledResponse {
        success: true,
        message: "Blog status updated".to_string(),
        is_published: post.is_published,
    }))
}

/// Generate blog content for a draft title.
///
/// # Request Body
///
/// ```json
/// { "prompt": "Why Rust for web backends" }
/// ```
///
/// # Response
///
/// - **Success (200)**: `{"success": true, "content": "..."}`
/// - **Error (400)**: blank prompt
/// - **Error (502)**: generation service failed (details are logged, not returned)
pub async fn generate_content(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<GeneratedContentResponse>, AppError> {
    tracing::debug!(admin = %auth.subject, "Content generation requested");

    let content = blog_service::generate_content(state.generator.as_ref(), &request.prompt).await?;

    Ok(Json(GeneratedContentResponse {
        success: true,
        content,
    }))
}

/// List published posts, newest first.
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<BlogListResponse>, AppError> {
    let blogs = blog_service::list_published(state.blogs.as_ref()).await?;

    Ok(Json(BlogListResponse {
        success: true,
        blogs,
    }))
}

/// Get one published post. Unknown ids and drafts both return 404.
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogResponse>, AppError> {
    let id = parse_blog_id(&id)?;
    let blog = blog_service::get_published(state.blogs.as_ref(), id).await?;

    Ok(Json(BlogResponse {
        success: true,
        blog,
    }))
}
