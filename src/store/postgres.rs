//! PostgreSQL blog store.
//!
//! Maps to the `blogs` table created by `migrations/20250101000001_create_blogs.sql`.
//! The category is stored as TEXT and parsed back into [`Category`] on read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{BlogFilter, BlogStore};
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::blog::{BlogPost, Category, NewBlogPost};

const COLUMNS: &str =
    "id, title, sub_title, description, category, image, is_published, created_at";

/// Row shape of the `blogs` table.
#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    title: String,
    sub_title: String,
    description: String,
    category: String,
    image: String,
    is_published: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<BlogRow> for BlogPost {
    type Error = AppError;

    fn try_from(row: BlogRow) -> Result<Self, Self::Error> {
        let category: Category = row.category.parse().map_err(|_| {
            AppError::Internal(format!(
                "Blog {} has unknown category {:?}",
                row.id, row.category
            ))
        })?;

        Ok(BlogPost {
            id: row.id,
            title: row.title,
            sub_title: row.sub_title,
            description: row.description,
            category,
            image: row.image,
            is_published: row.is_published,
            created_at: row.created_at,
        })
    }
}

pub struct PgBlogStore {
    pool: DbPool,
}

impl PgBlogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn insert(&self, blog: NewBlogPost) -> Result<BlogPost, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            INSERT INTO blogs (id, title, sub_title, description, category, image, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&blog.title)
        .bind(&blog.sub_title)
        .bind(&blog.description)
        .bind(blog.category.as_str())
        .bind(&blog.image)
        .bind(blog.is_published)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find(&self, id: Uuid) -> Result<Option<BlogPost>, AppError> {
        sqlx::query_as::<_, BlogRow>(&format!("SELECT {COLUMNS} FROM blogs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BlogPost::try_from)
            .transpose()
    }

    async fn list(&self, filter: BlogFilter) -> Result<Vec<BlogPost>, AppError> {
        let sql = match filter {
            BlogFilter::All => format!("SELECT {COLUMNS} FROM blogs ORDER BY created_at DESC"),
            BlogFilter::PublishedOnly => format!(
                "SELECT {COLUMNS} FROM blogs WHERE is_published = true ORDER BY created_at DESC"
            ),
        };

        sqlx::query_as::<_, BlogRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(BlogPost::try_from)
            .collect()
    }

    async fn toggle_publish(&self, id: Uuid) -> Result<Option<BlogPost>, AppError> {
        // Single statement, so concurrent toggles never lose a flip
        sqlx::query_as::<_, BlogRow>(&format!(
            "UPDATE blogs SET is_published = NOT is_published WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BlogPost::try_from)
        .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
