//! Content block repository.

use sqlx::PgPool;

use crate::entities::ContentBlockEntity;

/// Repository for page-scoped content blocks.
#[derive(Clone)]
pub struct ContentBlockRepository {
    pool: PgPool,
}

impl ContentBlockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All blocks for one page in one language, in sort order.
    pub async fn page_blocks(
        &self,
        page: &str,
        lang: &str,
    ) -> Result<Vec<ContentBlockEntity>, sqlx::Error> {
        sqlx::query_as::<_, ContentBlockEntity>(
            r#"
            SELECT id, page, block_key, lang, content, sort_order, updated_at
            FROM content_blocks
            WHERE page = $1 AND lang = $2
            ORDER BY sort_order, block_key
            "#,
        )
        .bind(page)
        .bind(lang)
        .fetch_all(&self.pool)
        .await
    }

    /// All blocks for one page across every language, in sort order.
    pub async fn page_blocks_all_langs(
        &self,
        page: &str,
    ) -> Result<Vec<ContentBlockEntity>, sqlx::Error> {
        sqlx::query_as::<_, ContentBlockEntity>(
            r#"
            SELECT id, page, block_key, lang, content, sort_order, updated_at
            FROM content_blocks
            WHERE page = $1
            ORDER BY sort_order, block_key, lang
            "#,
        )
        .bind(page)
        .fetch_all(&self.pool)
        .await
    }

    /// Upserts one block; content and order of an existing
    /// (page, block_key, lang) row are overwritten.
    pub async fn upsert(
        &self,
        page: &str,
        block_key: &str,
        lang: &str,
        content: &str,
        sort_order: i32,
    ) -> Result<ContentBlockEntity, sqlx::Error> {
        sqlx::query_as::<_, ContentBlockEntity>(
            r#"
            INSERT INTO content_blocks (page, block_key, lang, content, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (page, block_key, lang) DO UPDATE
            SET content = $4, sort_order = $5, updated_at = NOW()
            RETURNING id, page, block_key, lang, content, sort_order, updated_at
            "#,
        )
        .bind(page)
        .bind(block_key)
        .bind(lang)
        .bind(content)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
    }
}
