//! Translation domain models.
//!
//! Two distinct mechanisms share this module: the static per-(key, lang)
//! UI string table, and the free-text memoization table fronting the
//! generative translator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// One UI string translation, unique per (key, lang).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UiTranslation {
    pub key: String,
    pub lang: String,
    pub value: String,
}

/// The full UI string map for one language.
///
/// A language switch replaces the whole bundle; maps of different
/// languages are never merged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TranslationBundle {
    pub lang: String,
    pub strings: HashMap<String, String>,
}

impl TranslationBundle {
    /// `t(key, fallback)`: stored value, else the caller's fallback, else
    /// the raw key.
    pub fn resolve<'a>(&'a self, key: &'a str, fallback: Option<&'a str>) -> &'a str {
        match self.strings.get(key) {
            Some(value) => value.as_str(),
            None => fallback.unwrap_or(key),
        }
    }
}

/// Request payload for `POST /api/translate`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[validate(length(min = 1, max = 8192, message = "Text must be 1-8192 characters"))]
    pub text: String,

    #[validate(custom(function = "shared::validation::validate_lang"))]
    pub target_lang: String,

    /// Defaults to the primary site language.
    #[serde(default = "default_source_lang")]
    #[validate(custom(function = "shared::validation::validate_lang"))]
    pub source_lang: String,

    pub context: Option<String>,
}

fn default_source_lang() -> String {
    "ja".to_string()
}

/// Response body for `POST /api/translate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated: String,
    /// True when the result was served from the memoization table.
    pub cached: bool,
}

/// Request payload for upserting one UI translation string.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertUiTranslationRequest {
    #[validate(length(min = 1, max = 128, message = "Key must be 1-128 characters"))]
    pub key: String,

    #[validate(custom(function = "shared::validation::validate_lang"))]
    pub lang: String,

    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> TranslationBundle {
        let mut strings = HashMap::new();
        strings.insert("nav.home".to_string(), "ホーム".to_string());
        TranslationBundle {
            lang: "ja".to_string(),
            strings,
        }
    }

    #[test]
    fn test_bundle_resolve_hit() {
        assert_eq!(bundle().resolve("nav.home", Some("Home")), "ホーム");
    }

    #[test]
    fn test_bundle_resolve_fallback() {
        assert_eq!(bundle().resolve("nav.jobs", Some("Jobs")), "Jobs");
    }

    #[test]
    fn test_bundle_resolve_raw_key() {
        assert_eq!(bundle().resolve("nav.jobs", None), "nav.jobs");
    }

    #[test]
    fn test_translate_request_defaults_source_lang() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text": "こんにちは", "targetLang": "en"}"#).unwrap();
        assert_eq!(request.source_lang, "ja");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_translate_request_rejects_empty_text() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text": "", "targetLang": "en"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_translate_request_rejects_unknown_lang() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text": "hi", "targetLang": "tlh"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_translate_response_serialization() {
        let response = TranslateResponse {
            translated: "Hello".to_string(),
            cached: true,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"translated\":\"Hello\""));
        assert!(json.contains("\"cached\":true"));
    }
}
