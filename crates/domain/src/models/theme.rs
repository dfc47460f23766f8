//! Theme variable domain models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// One CSS-variable-style token scoped to a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ThemeVar {
    pub section: String,
    pub var_name: String,
    pub value: String,
}

/// Flat merged view suitable for direct use as style tokens.
pub type ThemeMap = HashMap<String, String>;

/// Request payload for upserting one theme variable.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertThemeVarRequest {
    #[validate(custom(function = "shared::validation::validate_scope_key"))]
    pub section: String,

    #[validate(custom(function = "shared::validation::validate_theme_var_name"))]
    pub var_name: String,

    #[validate(length(min = 1, max = 256, message = "Value must be 1-256 characters"))]
    pub value: String,
}
