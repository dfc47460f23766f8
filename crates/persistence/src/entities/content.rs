//! Content block database entity.

use chrono::{DateTime, Utc};
use domain::models::content::ContentBlock;
use sqlx::FromRow;
use uuid::Uuid;

/// Content block row, unique per (page, block_key, lang).
#[derive(Debug, Clone, FromRow)]
pub struct ContentBlockEntity {
    pub id: Uuid,
    pub page: String,
    pub block_key: String,
    pub lang: String,
    pub content: String,
    pub sort_order: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentBlockEntity> for ContentBlock {
    fn from(entity: ContentBlockEntity) -> Self {
        ContentBlock {
            id: entity.id,
            page: entity.page,
            block_key: entity.block_key,
            lang: entity.lang,
            content: entity.content,
            sort_order: entity.sort_order,
            updated_at: entity.updated_at,
        }
    }
}
