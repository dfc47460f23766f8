//! Site setting domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// How a setting value should be interpreted by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValueType {
    Text,
    Number,
    Boolean,
    Json,
    Image,
}

impl SettingValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingValueType::Text => "text",
            SettingValueType::Number => "number",
            SettingValueType::Boolean => "boolean",
            SettingValueType::Json => "json",
            SettingValueType::Image => "image",
        }
    }
}

impl FromStr for SettingValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SettingValueType::Text),
            "number" => Ok(SettingValueType::Number),
            "boolean" => Ok(SettingValueType::Boolean),
            "json" => Ok(SettingValueType::Json),
            "image" => Ok(SettingValueType::Image),
            _ => Err(format!("Invalid setting value type: {}", s)),
        }
    }
}

impl fmt::Display for SettingValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single admin-editable configuration value, unique per (section, key).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SiteSetting {
    pub section: String,
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub sort_order: i32,
}

/// Request payload for upserting one setting.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertSettingRequest {
    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub section: String,

    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub key: String,

    pub value: String,

    #[serde(default = "default_value_type")]
    pub value_type: SettingValueType,

    #[serde(default)]
    pub sort_order: i32,
}

fn default_value_type() -> SettingValueType {
    SettingValueType::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_roundtrip() {
        for s in ["text", "number", "boolean", "json", "image"] {
            let parsed = SettingValueType::from_str(s).unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!(SettingValueType::from_str("blob").is_err());
    }

    #[test]
    fn test_upsert_request_defaults() {
        let request: UpsertSettingRequest = serde_json::from_str(
            r#"{"section": "business", "key": "hero_title", "value": "採用を、もっと簡単に"}"#,
        )
        .unwrap();
        assert_eq!(request.value_type, SettingValueType::Text);
        assert_eq!(request.sort_order, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_upsert_request_rejects_bad_keys() {
        let request = UpsertSettingRequest {
            section: "Business Section".to_string(),
            key: "hero_title".to_string(),
            value: String::new(),
            value_type: SettingValueType::Text,
            sort_order: 0,
        };
        assert!(request.validate().is_err());
    }
}
