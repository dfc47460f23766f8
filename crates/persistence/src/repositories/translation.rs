//! Translation repository.
//!
//! Covers both the static UI string table and the free-text memoization
//! table in front of the generative translator.

use sqlx::PgPool;

use crate::entities::{TranslationCacheEntity, UiTranslationEntity};

/// Repository for UI strings and the translation cache.
#[derive(Clone)]
pub struct TranslationRepository {
    pool: PgPool,
}

impl TranslationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The full UI string set for one language.
    pub async fn bundle(&self, lang: &str) -> Result<Vec<UiTranslationEntity>, sqlx::Error> {
        sqlx::query_as::<_, UiTranslationEntity>(
            r#"
            SELECT id, key, lang, value
            FROM ui_translations
            WHERE lang = $1
            ORDER BY key
            "#,
        )
        .bind(lang)
        .fetch_all(&self.pool)
        .await
    }

    /// Upserts one UI string; the value of an existing (key, lang) row is
    /// overwritten.
    pub async fn upsert_ui(
        &self,
        key: &str,
        lang: &str,
        value: &str,
    ) -> Result<UiTranslationEntity, sqlx::Error> {
        sqlx::query_as::<_, UiTranslationEntity>(
            r#"
            INSERT INTO ui_translations (key, lang, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (key, lang) DO UPDATE
            SET value = $3
            RETURNING id, key, lang, value
            "#,
        )
        .bind(key)
        .bind(lang)
        .bind(value)
        .fetch_one(&self.pool)
        .await
    }

    /// Exact-match lookup in the memoization table. No normalization is
    /// applied; textually different inputs are distinct cache keys.
    pub async fn lookup_cached(
        &self,
        source_text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<TranslationCacheEntity>, sqlx::Error> {
        sqlx::query_as::<_, TranslationCacheEntity>(
            r#"
            SELECT id, source_text, source_lang, target_lang, translated, context, created_at, updated_at
            FROM translation_cache
            WHERE source_text = $1 AND source_lang = $2 AND target_lang = $3
            "#,
        )
        .bind(source_text)
        .bind(source_lang)
        .bind(target_lang)
        .fetch_optional(&self.pool)
        .await
    }

    /// Stores a fresh translation. Last writer wins on key collision.
    pub async fn upsert_cached(
        &self,
        source_text: &str,
        source_lang: &str,
        target_lang: &str,
        translated: &str,
        context: Option<&str>,
    ) -> Result<TranslationCacheEntity, sqlx::Error> {
        sqlx::query_as::<_, TranslationCacheEntity>(
            r#"
            INSERT INTO translation_cache (source_text, source_lang, target_lang, translated, context)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (source_text, source_lang, target_lang) DO UPDATE
            SET translated = $4, context = $5, updated_at = NOW()
            RETURNING id, source_text, source_lang, target_lang, translated, context, created_at, updated_at
            "#,
        )
        .bind(source_text)
        .bind(source_lang)
        .bind(target_lang)
        .bind(translated)
        .bind(context)
        .fetch_one(&self.pool)
        .await
    }
}
