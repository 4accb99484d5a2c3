//! Blog post data models and API request/response types.
//!
//! This module defines:
//! - `BlogPost`: Stored blog record
//! - `Category`: The fixed set of blog categories
//! - `BlogPayload`: The JSON carried in the `blog` multipart field on create
//! - Request and response bodies for the blog endpoints

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Blog categories offered by the admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Startup,
    Lifestyle,
    Finance,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Technology,
        Category::Startup,
        Category::Lifestyle,
        Category::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Startup => "Startup",
            Category::Lifestyle => "Lifestyle",
            Category::Finance => "Finance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| AppError::Validation("Invalid category".to_string()))
    }
}

/// A stored blog post.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// change. `is_published` is the only field mutated after creation.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "title": "Shipping Rust in production",
///   "subTitle": "Lessons learned",
///   "description": "<p>...</p>",
///   "category": "Technology",
///   "image": "/uploads/9f86d08....png",
///   "isPublished": false,
///   "createdAt": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub sub_title: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated blog post ready to be inserted into a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlogPost {
    pub title: String,
    pub sub_title: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub is_published: bool,
}

/// Raw blog fields as sent by the admin UI in the `blog` multipart field.
///
/// Every field is optional at this stage so that missing fields produce a
/// validation error instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPayload {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, alias = "subtitle")]
    pub sub_title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub is_published: bool,
}

/// Blog fields that passed validation, still waiting for an image reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBlog {
    pub title: String,
    pub sub_title: String,
    pub description: String,
    pub category: Category,
    pub is_published: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl BlogPayload {
    /// Check required fields and the category.
    ///
    /// # Errors
    ///
    /// - `Validation("Missing required fields")` if title, description or category is absent or blank
    /// - `Validation("Invalid category")` if the category is not one of [`Category::ALL`]
    pub fn validate(self) -> Result<ValidBlog, AppError> {
        let missing = || AppError::Validation("Missing required fields".to_string());

        let title = non_blank(self.title).ok_or_else(missing)?;
        let description = non_blank(self.description).ok_or_else(missing)?;
        let category = non_blank(self.category).ok_or_else(missing)?;

        Ok(ValidBlog {
            title: title.trim().to_string(),
            sub_title: self.sub_title.unwrap_or_default().trim().to_string(),
            description,
            category: category.parse()?,
            is_published: self.is_published,
        })
    }
}

impl ValidBlog {
    pub fn with_image(self, image: String) -> NewBlogPost {
        NewBlogPost {
            title: self.title,
            sub_title: self.sub_title,
            description: self.description,
            category: self.category,
            image,
            is_published: self.is_published,
        }
    }
}

/// Request body for toggle-publish and delete.
///
/// ```json
/// { "id": "550e8400-e29b-41d4-a716-446655440000" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogIdRequest {
    pub id: String,
}

impl BlogIdRequest {
    /// Parse the opaque identifier.
    ///
    /// An identifier that is not a UUID cannot name any stored post, so it is
    /// reported as `BlogNotFound` rather than a validation error.
    pub fn blog_id(&self) -> Result<Uuid, AppError> {
        parse_blog_id(&self.id)
    }
}

pub fn parse_blog_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BlogNotFound)
}

/// Request body for AI content generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Generic `{success, message}` response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Response for a successful create.
#[derive(Debug, Serialize)]
pub struct BlogCreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

/// Response for a successful toggle-publish.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishToggledResponse {
    pub success: bool,
    pub message: String,
    pub is_published: bool,
}

/// Response for a successful content generation.
#[derive(Debug, Serialize)]
pub struct GeneratedContentResponse {
    pub success: bool,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct BlogListResponse {
    pub success: bool,
    pub blogs: Vec<BlogPost>,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub success: bool,
    pub blog: BlogPost,
}
