//! Site setting repository.

use sqlx::PgPool;

use crate::entities::SiteSettingEntity;

/// Repository for site settings. Reads go through the settings cache;
/// writes come from the admin CMS.
#[derive(Clone)]
pub struct SiteSettingRepository {
    pool: PgPool,
}

impl SiteSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All rows of one section, ordered for admin display.
    pub async fn section_rows(
        &self,
        section: &str,
    ) -> Result<Vec<SiteSettingEntity>, sqlx::Error> {
        sqlx::query_as::<_, SiteSettingEntity>(
            r#"
            SELECT id, section, key, value, value_type, sort_order, updated_at
            FROM site_settings
            WHERE section = $1
            ORDER BY sort_order, key
            "#,
        )
        .bind(section)
        .fetch_all(&self.pool)
        .await
    }

    /// Upserts one setting; the value, type and order of an existing
    /// (section, key) row are overwritten.
    pub async fn upsert(
        &self,
        section: &str,
        key: &str,
        value: &str,
        value_type: &str,
        sort_order: i32,
    ) -> Result<SiteSettingEntity, sqlx::Error> {
        sqlx::query_as::<_, SiteSettingEntity>(
            r#"
            INSERT INTO site_settings (section, key, value, value_type, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (section, key) DO UPDATE
            SET value = $3, value_type = $4, sort_order = $5, updated_at = NOW()
            RETURNING id, section, key, value, value_type, sort_order, updated_at
            "#,
        )
        .bind(section)
        .bind(key)
        .bind(value)
        .bind(value_type)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await
    }
}
