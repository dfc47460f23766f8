//! Page resolution services: content, theme, navigation, UI strings.
//!
//! Everything here feeds server-rendered pages, so failures degrade to
//! empty results instead of surfacing. A partial page beats a failed
//! page; call sites carry their own fallback strings.

use std::collections::HashMap;

use sqlx::PgPool;

use domain::models::content::{ContentBlock, ContentMap, ContentMapAllLangs};
use domain::models::navigation::NavigationItem;
use domain::models::theme::ThemeMap;
use domain::models::translation::TranslationBundle;
use domain::services::theme_merge::merge_scopes;
use persistence::repositories::{
    ContentBlockRepository, NavigationRepository, ThemeVarRepository, TranslationRepository,
};

/// Read-side resolver over the content, theme, navigation and UI string
/// tables.
#[derive(Clone)]
pub struct SiteResolver {
    content: ContentBlockRepository,
    themes: ThemeVarRepository,
    navigation: NavigationRepository,
    translations: TranslationRepository,
}

impl SiteResolver {
    pub fn new(pool: PgPool) -> Self {
        Self {
            content: ContentBlockRepository::new(pool.clone()),
            themes: ThemeVarRepository::new(pool.clone()),
            navigation: NavigationRepository::new(pool.clone()),
            translations: TranslationRepository::new(pool),
        }
    }

    /// Flat `{block_key -> content}` map for one page and language.
    /// An unauthored page resolves to an empty map.
    pub async fn page_map(&self, page: &str, lang: &str) -> ContentMap {
        match self.content.page_blocks(page, lang).await {
            Ok(rows) => rows
                .into_iter()
                .map(|row| (row.block_key, row.content))
                .collect(),
            Err(e) => {
                tracing::warn!("Content fetch failed for page {} ({}): {}", page, lang, e);
                ContentMap::new()
            }
        }
    }

    /// The raw ordered block list for callers that need ordering.
    pub async fn page_list(&self, page: &str, lang: &str) -> Vec<ContentBlock> {
        match self.content.page_blocks(page, lang).await {
            Ok(rows) => rows.into_iter().map(ContentBlock::from).collect(),
            Err(e) => {
                tracing::warn!("Content fetch failed for page {} ({}): {}", page, lang, e);
                Vec::new()
            }
        }
    }

    /// `{block_key -> {lang -> content}}` for the admin editor.
    pub async fn page_all_langs(&self, page: &str) -> ContentMapAllLangs {
        match self.content.page_blocks_all_langs(page).await {
            Ok(rows) => {
                let mut map: ContentMapAllLangs = HashMap::new();
                for row in rows {
                    map.entry(row.block_key)
                        .or_default()
                        .insert(row.lang, row.content);
                }
                map
            }
            Err(e) => {
                tracing::warn!("Content fetch failed for page {}: {}", page, e);
                ContentMapAllLangs::new()
            }
        }
    }

    /// Merged theme map for the requested scopes, broadest first.
    /// A failing scope fetch contributes nothing; the rest still merge.
    pub async fn theme(&self, sections: &[String]) -> ThemeMap {
        let mut scopes = Vec::with_capacity(sections.len());
        for section in sections {
            match self.themes.section_vars(section).await {
                Ok(rows) => scopes.push(rows.into_iter().map(Into::into).collect()),
                Err(e) => {
                    tracing::warn!("Theme fetch failed for section {}: {}", section, e);
                    scopes.push(Vec::new());
                }
            }
        }
        merge_scopes(&scopes)
    }

    /// Ordered navigation items for one scope.
    pub async fn navigation(&self, section: &str) -> Vec<NavigationItem> {
        match self.navigation.section_items(section).await {
            Ok(rows) => rows.into_iter().map(Into::into).collect(),
            Err(e) => {
                tracing::warn!("Navigation fetch failed for section {}: {}", section, e);
                Vec::new()
            }
        }
    }

    /// Full UI string bundle for one language. A language switch is a
    /// fresh bundle, never a merge with the previous language.
    pub async fn ui_bundle(&self, lang: &str) -> TranslationBundle {
        let strings = match self.translations.bundle(lang).await {
            Ok(rows) => rows.into_iter().map(|row| (row.key, row.value)).collect(),
            Err(e) => {
                tracing::warn!("UI translation fetch failed for lang {}: {}", lang, e);
                HashMap::new()
            }
        };
        TranslationBundle {
            lang: lang.to_string(),
            strings,
        }
    }
}
