//! Public blog surface and cover-image generation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use chrono::{DateTime, Utc};
use domain::models::blog::{
    BlogPost, GenerateCoverRequest, GenerateCoverResponse, ListPostsQuery, PostStatus,
};
use persistence::repositories::BlogPostRepository;
use shared::pagination::{clamp_page, Pagination};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::SessionIdentity;

/// Listing entry without the full body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PostSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub lang: String,
    pub cover_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<BlogPost> for PostSummary {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            slug: post.slug,
            title: post.title,
            lang: post.lang,
            cover_url: post.cover_url,
            published_at: post.published_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListPostsResponse {
    pub data: Vec<PostSummary>,
    pub pagination: Pagination,
}

/// GET /api/blog
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<ListPostsResponse>, ApiError> {
    let (page, per_page, offset) = clamp_page(query.page, query.per_page);
    let repo = BlogPostRepository::new(state.pool.clone());

    let lang = query.lang.as_deref();
    let rows = repo.list_published(lang, per_page, offset).await?;
    let total = repo.count_published(lang).await?;

    let data = rows
        .into_iter()
        .map(|entity| PostSummary::from(entity.into_domain()))
        .collect();

    Ok(Json(ListPostsResponse {
        data,
        pagination: Pagination::new(page, per_page, total),
    }))
}

/// GET /api/blog/:slug
///
/// Drafts are invisible on the public surface.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let repo = BlogPostRepository::new(state.pool.clone());
    let post = repo
        .find_by_slug(&slug)
        .await?
        .map(|entity| entity.into_domain())
        .filter(|post| post.status == PostStatus::Published)
        .ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// POST /api/blog/generate-cover
///
/// Builds an illustration prompt from the title and asks the image
/// endpoint for a cover. An unconfigured or failing image service falls
/// back to the placeholder URL; this handler never errors on the image
/// path.
pub async fn generate_cover(
    State(state): State<AppState>,
    _identity: SessionIdentity,
    Json(request): Json<GenerateCoverRequest>,
) -> Result<Json<GenerateCoverResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let prompt = cover_prompt(&request.title);

    let Some(client) = state.generative.as_ref() else {
        return Ok(Json(fallback_response(&state, prompt)));
    };

    match client.generate_image(&prompt).await {
        Ok(bytes) => match store_cover(&state.config.media.dir, &bytes).await {
            Ok(url) => Ok(Json(GenerateCoverResponse {
                url,
                prompt,
                fallback: false,
            })),
            Err(e) => {
                tracing::warn!("Failed to store generated cover: {}", e);
                Ok(Json(fallback_response(&state, prompt)))
            }
        },
        Err(e) => {
            tracing::warn!("Cover generation failed: {}", e);
            Ok(Json(fallback_response(&state, prompt)))
        }
    }
}

fn cover_prompt(title: &str) -> String {
    format!(
        "Flat illustration for a blog article titled \"{}\" on a Japanese \
         employment-support platform. Warm colors, no text in the image.",
        title
    )
}

fn fallback_response(state: &AppState, prompt: String) -> GenerateCoverResponse {
    GenerateCoverResponse {
        url: state.config.media.placeholder_cover_url.clone(),
        prompt,
        fallback: true,
    }
}

/// Writes cover bytes under the media directory and returns the public
/// URL.
async fn store_cover(media_dir: &str, bytes: &[u8]) -> std::io::Result<String> {
    let file_name = format!("cover-{}.png", Uuid::new_v4());
    let path = std::path::Path::new(media_dir).join(&file_name);
    tokio::fs::create_dir_all(media_dir).await?;
    tokio::fs::write(&path, bytes).await?;
    Ok(format!("/media/{}", file_name))
}
