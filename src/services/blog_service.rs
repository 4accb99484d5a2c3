//! Blog service - business rules for the blog endpoints.
//!
//! Handlers stay thin: they extract request data and call into this module,
//! which validates input and talks to the [`BlogStore`], [`ImageStore`] and
//! [`ContentGenerator`] ports.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::blog::{BlogPayload, BlogPost};
use crate::services::content_generator::{ContentGenerator, PROMPT_SUFFIX};
use crate::services::image_store::{ImageStore, ImageUpload};
use crate::store::{BlogFilter, BlogStore};

/// Create a blog post from the multipart fields.
///
/// # Process
///
/// 1. Require both the `blog` JSON and the image
/// 2. Parse and validate the blog fields
/// 3. Validate and store the image (only after the fields passed, so a
///    rejected request never leaves an orphan file)
/// 4. Insert the post
///
/// # Errors
///
/// - `Validation`: missing fields, bad JSON, unknown category, non-image upload
/// - `Storage` / `Database`: persistence failures
pub async fn create_blog(
    blogs: &dyn BlogStore,
    images: &dyn ImageStore,
    blog_json: Option<String>,
    image: Option<ImageUpload>,
) -> Result<BlogPost, AppError> {
    let missing = || AppError::Validation("Missing required fields".to_string());

    let blog_json = blog_json.ok_or_else(missing)?;
    let image = image.ok_or_else(missing)?;

    let payload: BlogPayload = serde_json::from_str(&blog_json)
        .map_err(|_| AppError::Validation("Invalid blog payload".to_string()))?;
    let valid = payload.validate()?;

    image.validate()?;
    let image_ref = images.store(image).await?;

    blogs.insert(valid.with_image(image_ref)).await
}

/// Flip the published flag of a post.
///
/// # Errors
///
/// - `BlogNotFound`: no post with this id
pub async fn toggle_publish(blogs: &dyn BlogStore, id: Uuid) -> Result<BlogPost, AppError> {
    let post = blogs
        .toggle_publish(id)
        .await?
        .ok_or(AppError::BlogNotFound)?;

    tracing::info!(blog_id = %id, is_published = post.is_published, "Blog publish state toggled");
    Ok(post)
}

/// Permanently delete a post.
///
/// Deleting an id twice reports `BlogNotFound` the second time.
pub async fn delete_blog(blogs: &dyn BlogStore, id: Uuid) -> Result<(), AppError> {
    if !blogs.delete(id).await? {
        return Err(AppError::BlogNotFound);
    }

    Ok(())
}

/// Ask the external generator for content about `title`.
///
/// # Errors
///
/// - `Validation("Please enter the title")`: blank prompt, nothing is sent upstream
/// - `Upstream`: the generation service failed
pub async fn generate_content(
    generator: &dyn ContentGenerator,
    title: &str,
) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Please enter the title".to_string()));
    }

    generator.generate(&format!("{}{}", title, PROMPT_SUFFIX)).await
}

/// Published posts, newest first.
pub async fn list_published(blogs: &dyn BlogStore) -> Result<Vec<BlogPost>, AppError> {
    blogs.list(BlogFilter::PublishedOnly).await
}

/// Every post, newest first. Admin only.
pub async fn list_all(blogs: &dyn BlogStore) -> Result<Vec<BlogPost>, AppError> {
    blogs.list(BlogFilter::All).await
}

/// A single published post. Drafts are reported as not found.
pub async fn get_published(blogs: &dyn BlogStore, id: Uuid) -> Result<BlogPost, AppError> {
    blogs
        .find(id)
        .await?
        .filter(|post| post.is_published)
        .ok_or(AppError::BlogNotFound)
}
