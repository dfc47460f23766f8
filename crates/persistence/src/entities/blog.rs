//! Blog post database entity.

use chrono::{DateTime, Utc};
use domain::models::blog::{BlogPost, PostStatus};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Blog post row.
#[derive(Debug, Clone, FromRow)]
pub struct BlogPostEntity {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub lang: String,
    pub status: String,
    pub cover_url: Option<String>,
    pub author_id: Uuid,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPostEntity {
    /// Converts to the domain model. Rows with an unrecognized status
    /// column are treated as drafts.
    pub fn into_domain(self) -> BlogPost {
        let status = PostStatus::from_str(&self.status).unwrap_or(PostStatus::Draft);
        BlogPost {
            id: self.id,
            slug: self.slug,
            title: self.title,
            body: self.body,
            lang: self.lang,
            status,
            cover_url: self.cover_url,
            author_id: self.author_id,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
