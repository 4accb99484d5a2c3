//! Storage for uploaded cover images.
//!
//! An image store turns the uploaded artifact into an opaque reference that
//! is saved on the blog post. Images are content addressed: the file name is
//! the SHA-256 of the bytes, so re-uploading the same image reuses the file.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::error::AppError;

/// URL prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Image formats accepted for cover images.
///
/// The stored extension comes from this, never from the client's file name,
/// so `/uploads` only ever serves image types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageKind {
    /// Parse a declared content type such as `image/png; charset=binary`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/gif" => Some(ImageKind::Gif),
            "image/webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Gif => "gif",
            ImageKind::Webp => "webp",
        }
    }
}

/// An uploaded image as received from the multipart `image` field.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Reject empty files and parts whose declared content type is missing or
    /// not one of the [`ImageKind`] formats (SVG included).
    pub fn validate(&self) -> Result<ImageKind, AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::Validation("Missing required fields".to_string()));
        }

        self.content_type
            .as_deref()
            .and_then(ImageKind::from_content_type)
            .ok_or_else(|| AppError::Validation("Image must be an image file".to_string()))
    }

    /// Stored file name: `<sha256 hex>.<ext>`, with the extension taken from
    /// the validated content type.
    pub fn storage_name(&self) -> Result<String, AppError> {
        let kind = self.validate()?;
        let digest = hex::encode(Sha256::digest(&self.bytes));
        Ok(format!("{}.{}", digest, kind.extension()))
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the image and return the reference saved on the post.
    async fn store(&self, upload: ImageUpload) -> Result<String, AppError>;
}

/// Writes images into a local directory served under [`PUBLIC_PREFIX`].
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, AppError> {
        let name = upload.storage_name()?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create {:?}: {}", self.root, e)))?;

        let path = self.root.join(&name);
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {:?}: {}", path, e)))?;

        tracing::debug!("Stored image {} ({} bytes)", name, upload.bytes.len());
        Ok(format!("{}/{}", PUBLIC_PREFIX, name))
    }
}

/// Keeps images in memory. Used in tests and when running without a disk.
#[derive(Default)]
pub struct InMemoryImageStore {
    images: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, reference: &str) -> Option<Vec<u8>> {
        self.images.read().await.get(reference).cloned()
    }

    pub async fn count(&self) -> usize {
        self.images.read().await.len()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, upload: ImageUpload) -> Result<String, AppError> {
        let reference = format!("{}/{}", PUBLIC_PREFIX, upload.storage_name()?);
        self.images
            .write()
            .await
            .insert(reference.clone(), upload.bytes);
        Ok(reference)
    }
}
