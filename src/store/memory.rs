//! In-memory blog store - used when no database is configured.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BlogFilter, BlogStore};
use crate::error::AppError;
use crate::models::blog::{BlogPost, NewBlogPost};

pub struct InMemoryBlogStore {
    posts: RwLock<HashMap<Uuid, BlogPost>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn insert(&self, blog: NewBlogPost) -> Result<BlogPost, AppError> {
        let post = BlogPost {
            id: Uuid::new_v4(),
            title: blog.title,
            sub_title: blog.sub_title,
            description: blog.description,
            category: blog.category,
            image: blog.image,
            is_published: blog.is_published,
            created_at: Utc::now(),
        };

        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find(&self, id: Uuid) -> Result<Option<BlogPost>, AppError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: BlogFilter) -> Result<Vec<BlogPost>, AppError> {
        let posts = self.posts.read().await;
        let mut listed: Vec<BlogPost> = posts
            .values()
            .filter(|p| filter == BlogFilter::All || p.is_published)
            .cloned()
            .collect();

        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn toggle_publish(&self, id: Uuid) -> Result<Option<BlogPost>, AppError> {
        let mut posts = self.posts.write().await;
        Ok(posts.get_mut(&id).map(|post| {
            post.is_published = !post.is_published;
            post.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
