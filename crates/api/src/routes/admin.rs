//! Admin CMS routes.
//!
//! Everything here lives under `/api/admin` and is gated by the route
//! guard: admins pass everywhere, editors only reach the blog handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::blog::{BlogPost, CreateBlogPostRequest, UpdateBlogPostRequest};
use domain::models::content::UpsertContentBlockRequest;
use domain::models::navigation::{NavigationItem, ReplaceNavigationRequest};
use domain::models::site_setting::{SiteSetting, UpsertSettingRequest};
use domain::models::theme::{ThemeVar, UpsertThemeVarRequest};
use domain::models::translation::{UiTranslation, UpsertUiTranslationRequest};
use persistence::repositories::{
    BlogPostRepository, ContentBlockRepository, NavigationRepository, SiteSettingRepository,
    ThemeVarRepository, TranslationRepository,
};
use shared::pagination::{clamp_page, Pagination};
use shared::validation::generate_slug;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::SessionIdentity;

/// PUT /api/admin/settings
///
/// Upserts one site setting and invalidates the cached section so this
/// process observes the write immediately. Other replicas converge
/// within the cache TTL.
pub async fn upsert_setting(
    State(state): State<AppState>,
    Json(request): Json<UpsertSettingRequest>,
) -> Result<Json<SiteSetting>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repo = SiteSettingRepository::new(state.pool.clone());
    let row = repo
        .upsert(
            &request.section,
            &request.key,
            &request.value,
            request.value_type.as_str(),
            request.sort_order,
        )
        .await?;

    state.settings.invalidate(&request.section).await;

    Ok(Json(SiteSetting {
        section: row.section,
        key: row.key,
        value: row.value,
        value_type: request.value_type,
        sort_order: row.sort_order,
    }))
}

/// PUT /api/admin/content
pub async fn upsert_content(
    State(state): State<AppState>,
    Json(request): Json<UpsertContentBlockRequest>,
) -> Result<Json<domain::models::content::ContentBlock>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repo = ContentBlockRepository::new(state.pool.clone());
    let row = repo
        .upsert(
            &request.page,
            &request.block_key,
            &request.lang,
            &request.content,
            request.sort_order,
        )
        .await?;

    Ok(Json(row.into()))
}

/// PUT /api/admin/theme
pub async fn upsert_theme(
    State(state): State<AppState>,
    Json(request): Json<UpsertThemeVarRequest>,
) -> Result<Json<ThemeVar>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repo = ThemeVarRepository::new(state.pool.clone());
    let row = repo
        .upsert(&request.section, &request.var_name, &request.value)
        .await?;

    Ok(Json(row.into()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReplaceNavigationResponse {
    pub section: String,
    pub items: Vec<NavigationItem>,
}

/// PUT /api/admin/navigation
pub async fn replace_navigation(
    State(state): State<AppState>,
    Json(request): Json<ReplaceNavigationRequest>,
) -> Result<Json<ReplaceNavigationResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repo = NavigationRepository::new(state.pool.clone());
    let rows = repo
        .replace_section(&request.section, &request.items)
        .await?;

    Ok(Json(ReplaceNavigationResponse {
        section: request.section,
        items: rows.into_iter().map(Into::into).collect(),
    }))
}

/// PUT /api/admin/translations
pub async fn upsert_translation(
    State(state): State<AppState>,
    Json(request): Json<UpsertUiTranslationRequest>,
) -> Result<Json<UiTranslation>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repo = TranslationRepository::new(state.pool.clone());
    let row = repo
        .upsert_ui(&request.key, &request.lang, &request.value)
        .await?;

    Ok(Json(UiTranslation {
        key: row.key,
        lang: row.lang,
        value: row.value,
    }))
}

#[derive(Debug, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct AdminListPostsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminListPostsResponse {
    pub data: Vec<BlogPost>,
    pub pagination: Pagination,
}

/// GET /api/admin/blog
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<AdminListPostsQuery>,
) -> Result<Json<AdminListPostsResponse>, ApiError> {
    let (page, per_page, offset) = clamp_page(query.page, query.per_page);
    let repo = BlogPostRepository::new(state.pool.clone());

    let rows = repo.list_all(per_page, offset).await?;
    let total = repo.count_all().await?;

    Ok(Json(AdminListPostsResponse {
        data: rows.into_iter().map(|entity| entity.into_domain()).collect(),
        pagination: Pagination::new(page, per_page, total),
    }))
}

/// POST /api/admin/blog
pub async fn create_post(
    State(state): State<AppState>,
    identity: SessionIdentity,
    Json(request): Json<CreateBlogPostRequest>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    request.validate().map_err(ApiError::from)?;

    let slug = request
        .slug
        .clone()
        .unwrap_or_else(|| generate_slug(&request.title));
    if slug.is_empty() {
        return Err(ApiError::Validation(
            "A slug could not be derived from the title; supply one explicitly".to_string(),
        ));
    }

    let repo = BlogPostRepository::new(state.pool.clone());
    let row = repo
        .insert(
            &slug,
            &request.title,
            &request.body,
            &request.lang,
            identity.profile_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(row.into_domain())))
}

/// PUT /api/admin/blog/:id
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBlogPostRequest>,
) -> Result<Json<BlogPost>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let repo = BlogPostRepository::new(state.pool.clone());
    if repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound("Post not found".to_string()));
    }

    let row = repo
        .update(
            id,
            request.title.as_deref(),
            request.body.as_deref(),
            request.cover_url.as_deref(),
            request.status.map(|status| status.as_str()),
        )
        .await?;

    Ok(Json(row.into_domain()))
}

/// DELETE /api/admin/blog/:id
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = BlogPostRepository::new(state.pool.clone());
    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Post not found".to_string()))
    }
}
