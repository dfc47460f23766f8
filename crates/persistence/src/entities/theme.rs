//! Theme variable database entity.

use chrono::{DateTime, Utc};
use domain::models::theme::ThemeVar;
use sqlx::FromRow;
use uuid::Uuid;

/// Theme variable row, unique per (section, var_name).
#[derive(Debug, Clone, FromRow)]
pub struct ThemeVarEntity {
    pub id: Uuid,
    pub section: String,
    pub var_name: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ThemeVarEntity> for ThemeVar {
    fn from(entity: ThemeVarEntity) -> Self {
        ThemeVar {
            section: entity.section,
            var_name: entity.var_name,
            value: entity.value,
        }
    }
}
