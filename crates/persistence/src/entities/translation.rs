//! Translation database entities.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// UI translation string row, unique per (key, lang).
#[derive(Debug, Clone, FromRow)]
pub struct UiTranslationEntity {
    pub id: Uuid,
    pub key: String,
    pub lang: String,
    pub value: String,
}

/// Memoized free-text translation row, unique per
/// (source_text, source_lang, target_lang).
#[derive(Debug, Clone, FromRow)]
pub struct TranslationCacheEntity {
    pub id: Uuid,
    pub source_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub translated: String,
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
