//! Site setting database entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Site setting row, unique per (section, key).
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettingEntity {
    pub id: Uuid,
    pub section: String,
    pub key: String,
    pub value: String,
    pub value_type: String,
    pub sort_order: i32,
    pub updated_at: DateTime<Utc>,
}
