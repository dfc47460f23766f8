//! Navigation item repository.

use sqlx::PgPool;

use crate::entities::NavigationItemEntity;
use domain::models::navigation::NavigationItemInput;

/// Repository for ordered navigation scopes.
#[derive(Clone)]
pub struct NavigationRepository {
    pool: PgPool,
}

impl NavigationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All items of one navigation scope, in display order.
    pub async fn section_items(
        &self,
        section: &str,
    ) -> Result<Vec<NavigationItemEntity>, sqlx::Error> {
        sqlx::query_as::<_, NavigationItemEntity>(
            r#"
            SELECT id, section, href, label, icon, sort_order
            FROM navigation_items
            WHERE section = $1
            ORDER BY sort_order, id
            "#,
        )
        .bind(section)
        .fetch_all(&self.pool)
        .await
    }

    /// Replaces all items of one scope atomically; sort order follows the
    /// input order.
    pub async fn replace_section(
        &self,
        section: &str,
        items: &[NavigationItemInput],
    ) -> Result<Vec<NavigationItemEntity>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM navigation_items WHERE section = $1")
            .bind(section)
            .execute(&mut *tx)
            .await?;

        let mut inserted = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let row = sqlx::query_as::<_, NavigationItemEntity>(
                r#"
                INSERT INTO navigation_items (section, href, label, icon, sort_order)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, section, href, label, icon, sort_order
                "#,
            )
            .bind(section)
            .bind(&item.href)
            .bind(&item.label)
            .bind(&item.icon)
            .bind(index as i32)
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
