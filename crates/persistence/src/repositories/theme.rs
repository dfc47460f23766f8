//! Theme variable repository.

use sqlx::PgPool;

use crate::entities::ThemeVarEntity;

/// Repository for section-scoped theme variables.
#[derive(Clone)]
pub struct ThemeVarRepository {
    pool: PgPool,
}

impl ThemeVarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All variables of one section.
    pub async fn section_vars(&self, section: &str) -> Result<Vec<ThemeVarEntity>, sqlx::Error> {
        sqlx::query_as::<_, ThemeVarEntity>(
            r#"
            SELECT id, section, var_name, value, updated_at
            FROM theme_vars
            WHERE section = $1
            ORDER BY var_name
            "#,
        )
        .bind(section)
        .fetch_all(&self.pool)
        .await
    }

    /// Upserts one variable; the value of an existing (section, var_name)
    /// row is overwritten.
    pub async fn upsert(
        &self,
        section: &str,
        var_name: &str,
        value: &str,
    ) -> Result<ThemeVarEntity, sqlx::Error> {
        sqlx::query_as::<_, ThemeVarEntity>(
            r#"
            INSERT INTO theme_vars (section, var_name, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (section, var_name) DO UPDATE
            SET value = $3, updated_at = NOW()
            RETURNING id, section, var_name, value, updated_at
            "#,
        )
        .bind(section)
        .bind(var_name)
        .bind(value)
        .fetch_one(&self.pool)
        .await
    }
}
