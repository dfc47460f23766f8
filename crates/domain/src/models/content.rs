//! Content block domain models.
//!
//! A content block is a localizable, admin-editable text fragment
//! addressed by page scope and block key. The resolver reflects persisted
//! rows only; call sites own their fallback strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

/// A localizable text fragment for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContentBlock {
    pub id: Uuid,
    pub page: String,
    pub block_key: String,
    pub lang: String,
    pub content: String,
    pub sort_order: i32,
    pub updated_at: DateTime<Utc>,
}

/// Flat single-language view of a page, keyed by block key.
pub type ContentMap = HashMap<String, String>;

/// All-language view: block key -> lang -> content.
pub type ContentMapAllLangs = HashMap<String, HashMap<String, String>>;

/// Looks a key up in a resolved content map with an explicit fallback.
///
/// The resolver never synthesizes defaults; this helper makes the
/// fallback contract visible at the call site.
pub fn resolve<'a>(map: &'a ContentMap, key: &str, default: &'a str) -> &'a str {
    map.get(key).map(String::as_str).unwrap_or(default)
}

/// Request payload for upserting one content block.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertContentBlockRequest {
    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub page: String,

    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub block_key: String,

    #[validate(custom(function = "shared::validation::validate_lang"))]
    pub lang: String,

    pub content: String,

    #[serde(default)]
    pub sort_order: i32,
}
