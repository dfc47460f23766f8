//! Public site resolution surface.
//!
//! These endpoints feed page rendering: content maps, merged theme
//! tokens, navigation, cached section settings, and UI string bundles.
//! Lookups degrade to empty results; nothing on this surface returns a
//! 5xx for a failed fetch.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use domain::models::content::{ContentBlock, ContentMap, ContentMapAllLangs};
use domain::models::navigation::NavigationItem;
use domain::models::theme::ThemeMap;
use domain::models::translation::TranslationBundle;

use crate::app::AppState;

/// Default language for content lookups.
const DEFAULT_LANG: &str = "ja";

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ContentQuery {
    pub lang: Option<String>,
    #[serde(default)]
    pub all_langs: bool,
}

/// Single-language content for one page: the keyed map plus the raw
/// ordered block list for callers that need ordering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContentResponse {
    pub page: String,
    pub lang: String,
    pub blocks: ContentMap,
    pub items: Vec<ContentBlock>,
}

/// All-language content for the admin editor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContentAllLangsResponse {
    pub page: String,
    pub blocks: ContentMapAllLangs,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContentLookupResponse {
    SingleLang(ContentResponse),
    AllLangs(ContentAllLangsResponse),
}

/// GET /api/site/content/:page
pub async fn get_content(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Json<ContentLookupResponse> {
    if query.all_langs {
        let blocks = state.resolver.page_all_langs(&page).await;
        return Json(ContentLookupResponse::AllLangs(ContentAllLangsResponse {
            page,
            blocks,
        }));
    }

    let lang = query.lang.unwrap_or_else(|| DEFAULT_LANG.to_string());
    // Independent fetches, awaited jointly; each degrades on its own.
    let (blocks, items) = tokio::join!(
        state.resolver.page_map(&page, &lang),
        state.resolver.page_list(&page, &lang)
    );
    Json(ContentLookupResponse::SingleLang(ContentResponse {
        page,
        lang,
        blocks,
        items,
    }))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ThemeQuery {
    /// Comma-separated scopes, broadest first, e.g. `global,business`.
    pub sections: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ThemeResponse {
    pub sections: Vec<String>,
    pub theme: ThemeMap,
}

/// GET /api/site/theme?sections=global,business
pub async fn get_theme(
    State(state): State<AppState>,
    Query(query): Query<ThemeQuery>,
) -> Json<ThemeResponse> {
    let sections: Vec<String> = query
        .sections
        .as_deref()
        .unwrap_or("global")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let theme = state.resolver.theme(&sections).await;
    Json(ThemeResponse { sections, theme })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NavigationResponse {
    pub section: String,
    pub items: Vec<NavigationItem>,
}

/// GET /api/site/navigation/:section
pub async fn get_navigation(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Json<NavigationResponse> {
    let items = state.resolver.navigation(&section).await;
    Json(NavigationResponse { section, items })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingsResponse {
    pub section: String,
    pub settings: std::collections::HashMap<String, String>,
}

/// GET /api/site/settings/:section
///
/// Served through the TTL settings cache; a failed refresh falls back to
/// the last known map or an empty one.
pub async fn get_settings(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Json<SettingsResponse> {
    let settings = state.settings.get(&section).await;
    Json(SettingsResponse { section, settings })
}

/// GET /api/site/translations/:lang
pub async fn get_translations(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Json<TranslationBundle> {
    Json(state.resolver.ui_bundle(&lang).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_query_section_parsing() {
        let query = ThemeQuery {
            sections: Some("global, business ,".to_string()),
        };
        let sections: Vec<String> = query
            .sections
            .as_deref()
            .unwrap_or("global")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(sections, vec!["global", "business"]);
    }

    #[test]
    fn test_content_query_defaults() {
        let query: ContentQuery = serde_json::from_str("{}").unwrap();
        assert!(query.lang.is_none());
        assert!(!query.all_langs);
    }

    #[test]
    fn test_content_response_serialization() {
        let mut blocks = ContentMap::new();
        blocks.insert("hero_title".to_string(), "見出し".to_string());
        let response = ContentResponse {
            page: "business_top".to_string(),
            lang: "ja".to_string(),
            blocks,
            items: vec![],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"page\":\"business_top\""));
        assert!(json.contains("\"hero_title\":\"見出し\""));
    }
}
