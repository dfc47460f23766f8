//! Blog post repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::BlogPostEntity;

const POST_COLUMNS: &str =
    "id, slug, title, body, lang, status, cover_url, author_id, published_at, created_at, updated_at";

/// Repository for CMS blog posts.
#[derive(Clone)]
pub struct BlogPostRepository {
    pool: PgPool,
}

impl BlogPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published posts, newest first, optionally filtered by language.
    pub async fn list_published(
        &self,
        lang: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPostEntity>, sqlx::Error> {
        sqlx::query_as::<_, BlogPostEntity>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM blog_posts
            WHERE status = 'published' AND ($1::text IS NULL OR lang = $1)
            ORDER BY published_at DESC NULLS LAST
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(lang)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Count matching `list_published` for pagination.
    pub async fn count_published(&self, lang: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM blog_posts
            WHERE status = 'published' AND ($1::text IS NULL OR lang = $1)
            "#,
        )
        .bind(lang)
        .fetch_one(&self.pool)
        .await
    }

    /// Total post count for the CMS listing.
    pub async fn count_all(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(&self.pool)
            .await
    }

    /// All posts for the CMS listing, newest first.
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<BlogPostEntity>, sqlx::Error> {
        sqlx::query_as::<_, BlogPostEntity>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM blog_posts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPostEntity>, sqlx::Error> {
        sqlx::query_as::<_, BlogPostEntity>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM blog_posts
            WHERE slug = $1
            "#
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPostEntity>, sqlx::Error> {
        sqlx::query_as::<_, BlogPostEntity>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM blog_posts
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Creates a draft post.
    pub async fn insert(
        &self,
        slug: &str,
        title: &str,
        body: &str,
        lang: &str,
        author_id: Uuid,
    ) -> Result<BlogPostEntity, sqlx::Error> {
        sqlx::query_as::<_, BlogPostEntity>(&format!(
            r#"
            INSERT INTO blog_posts (slug, title, body, lang, status, author_id)
            VALUES ($1, $2, $3, $4, 'draft', $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(slug)
        .bind(title)
        .bind(body)
        .bind(lang)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Partial update; absent fields keep their current value. Moving a
    /// post to `published` stamps `published_at` on first publish.
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        body: Option<&str>,
        cover_url: Option<&str>,
        status: Option<&str>,
    ) -> Result<BlogPostEntity, sqlx::Error> {
        sqlx::query_as::<_, BlogPostEntity>(&format!(
            r#"
            UPDATE blog_posts
            SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                cover_url = COALESCE($4, cover_url),
                status = COALESCE($5, status),
                published_at = CASE
                    WHEN $5 = 'published' AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(title)
        .bind(body)
        .bind(cover_url)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
