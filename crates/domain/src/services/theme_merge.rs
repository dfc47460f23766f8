//! Theme scope merge.
//!
//! Scopes are applied broadest first; a later (narrower) scope overwrites
//! duplicate variable names, giving deterministic most-specific-wins
//! resolution with no partial-override ambiguity.

use crate::models::theme::{ThemeMap, ThemeVar};

/// Merges theme rows scope by scope into a flat variable map.
///
/// `scopes` must be ordered broadest to narrowest (e.g. the `global` rows
/// first, then `business`).
pub fn merge_scopes(scopes: &[Vec<ThemeVar>]) -> ThemeMap {
    let mut merged = ThemeMap::new();
    for rows in scopes {
        for var in rows {
            merged.insert(var.var_name.clone(), var.value.clone());
        }
    }
    merged
}
