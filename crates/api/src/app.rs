use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use persistence::repositories::{SiteSettingRepository, TranslationRepository};
use shared::session::SessionKeys;

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, route_guard, security_headers_middleware,
    session_context, trace_id,
};
use crate::routes::{admin, auth, blog, diagnosis, health, simulation, site, translate};
use crate::services::settings_cache::{SystemClock, SettingsService};
use crate::services::{GenerativeClient, SiteResolver, TranslationService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub session_keys: Arc<SessionKeys>,
    pub settings: Arc<SettingsService>,
    pub translator: Arc<TranslationService>,
    pub resolver: SiteResolver,
    pub generative: Option<Arc<GenerativeClient>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Session keys are server-critical configuration: bad PEM input must
    // stop startup, not surface per request.
    let session_keys = Arc::new(
        SessionKeys::with_leeway(
            &config.session.private_key,
            &config.session.public_key,
            config.session.session_expiry_secs,
            config.session.leeway_secs,
        )
        .expect("Invalid session key configuration"),
    );

    // Generative credentials are optional; dependent features degrade.
    let generative = GenerativeClient::from_config(&config.generative).map(Arc::new);
    if generative.is_none() {
        tracing::warn!("Generative service not configured; translation, diagnosis and cover generation run degraded");
    }

    let settings = Arc::new(SettingsService::new(
        Arc::new(SiteSettingRepository::new(pool.clone())),
        Duration::from_secs(config.cache.settings_ttl_secs),
        Arc::new(SystemClock),
    ));

    let translator = Arc::new(TranslationService::new(
        Arc::new(TranslationRepository::new(pool.clone())),
        generative
            .clone()
            .map(|client| client as Arc<dyn crate::services::translation::TranslationBackend>),
    ));

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        session_keys,
        settings,
        translator,
        resolver: SiteResolver::new(pool),
        generative,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public page-resolution surface: never 5xx on a failed lookup.
    let site_routes = Router::new()
        .route("/api/site/content/:page", get(site::get_content))
        .route("/api/site/theme", get(site::get_theme))
        .route("/api/site/navigation/:section", get(site::get_navigation))
        .route("/api/site/settings/:section", get(site::get_settings))
        .route("/api/site/translations/:lang", get(site::get_translations));

    // Authenticated JSON API (identity enforced per handler).
    let api_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/translate", post(translate::translate))
        .route("/api/simulation/calculate", post(simulation::calculate))
        .route("/api/diagnosis/analyze", post(diagnosis::analyze))
        .route("/api/blog", get(blog::list_posts))
        .route("/api/blog/generate-cover", post(blog::generate_cover))
        .route("/api/blog/:slug", get(blog::get_post));

    // Admin CMS; the route guard redirects anyone who does not belong.
    let admin_routes = Router::new()
        .route("/api/admin/settings", put(admin::upsert_setting))
        .route("/api/admin/content", put(admin::upsert_content))
        .route("/api/admin/theme", put(admin::upsert_theme))
        .route("/api/admin/navigation", put(admin::replace_navigation))
        .route("/api/admin/translations", put(admin::upsert_translation))
        .route(
            "/api/admin/blog",
            get(admin::list_posts).post(admin::create_post),
        )
        .route(
            "/api/admin/blog/:id",
            put(admin::update_post).delete(admin::delete_post),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(site_routes)
        .merge(api_routes)
        .merge(admin_routes)
        .nest_service("/media", ServeDir::new(&config.media.dir))
        // Guard runs after session extraction (inner layers run later).
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_context,
        ))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
