//! Navigation item database entity.

use domain::models::navigation::NavigationItem;
use sqlx::FromRow;
use uuid::Uuid;

/// Navigation item row, ordered within its section by sort_order.
#[derive(Debug, Clone, FromRow)]
pub struct NavigationItemEntity {
    pub id: Uuid,
    pub section: String,
    pub href: String,
    pub label: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

impl From<NavigationItemEntity> for NavigationItem {
    fn from(entity: NavigationItemEntity) -> Self {
        NavigationItem {
            id: entity.id,
            section: entity.section,
            href: entity.href,
            label: entity.label,
            icon: entity.icon,
            sort_order: entity.sort_order,
        }
    }
}
