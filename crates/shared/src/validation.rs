//! Common validation utilities.

use validator::ValidationError;

/// Languages the platform serves content in.
pub const SUPPORTED_LANGS: &[&str] = &["ja", "en", "vi", "zh", "id", "my", "ne"];

/// Maximum length for section / page / block key identifiers.
const MAX_KEY_LENGTH: usize = 64;

/// Validates that a language code is one the platform serves.
pub fn validate_lang(lang: &str) -> Result<(), ValidationError> {
    if SUPPORTED_LANGS.contains(&lang) {
        Ok(())
    } else {
        let mut err = ValidationError::new("unsupported_lang");
        err.message = Some("Unsupported language code".into());
        Err(err)
    }
}

/// Validates a scope identifier (section, page, block key, navigation
/// scope). Lowercase alphanumerics, `_` and `-`, non-empty, bounded.
pub fn validate_scope_key(key: &str) -> Result<(), ValidationError> {
    let ok = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_scope_key");
        err.message =
            Some("Keys must be 1-64 lowercase alphanumeric, underscore or dash characters".into());
        Err(err)
    }
}

/// Validates a CSS-variable-style theme variable name (`--biz-primary`).
pub fn validate_theme_var_name(name: &str) -> Result<(), ValidationError> {
    let ok = name.len() > 2
        && name.len() <= MAX_KEY_LENGTH
        && name.starts_with("--")
        && name[2..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_theme_var");
        err.message = Some("Theme variables must look like --lowercase-name".into());
        Err(err)
    }
}

/// Generates a URL-safe slug from a title.
pub fn generate_slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                ' ' // Will be filtered out
            }
        })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
