//! Navigation item domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One link in an ordered navigation scope (e.g. `admin_sidebar`,
/// `business_header`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NavigationItem {
    pub id: Uuid,
    pub section: String,
    pub href: String,
    pub label: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

/// One item in a navigation replace request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NavigationItemInput {
    #[validate(length(min = 1, max = 256, message = "href must be 1-256 characters"))]
    pub href: String,

    #[validate(length(min = 1, max = 128, message = "Label must be 1-128 characters"))]
    pub label: String,

    pub icon: Option<String>,
}

/// Request payload replacing all items of one navigation section.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ReplaceNavigationRequest {
    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub section: String,

    #[validate(nested)]
    pub items: Vec<NavigationItemInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_navigation_validation() {
        let valid = ReplaceNavigationRequest {
            section: "business_header".to_string(),
            items: vec![NavigationItemInput {
                href: "/business/home".to_string(),
                label: "ホーム".to_string(),
                icon: Some("home".to_string()),
            }],
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_replace_navigation_rejects_empty_label() {
        let request = ReplaceNavigationRequest {
            section: "business_header".to_string(),
            items: vec![NavigationItemInput {
                href: "/business/home".to_string(),
                label: String::new(),
                icon: None,
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_item_list_is_valid() {
        let request = ReplaceNavigationRequest {
            section: "worker_header".to_string(),
            items: vec![],
        };
        assert!(request.validate().is_ok());
    }
}
