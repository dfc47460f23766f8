//! Application services.

pub mod diagnosis;
pub mod generative;
pub mod settings_cache;
pub mod simulation;
pub mod site_resolver;
pub mod translation;

pub use generative::GenerativeClient;
pub use settings_cache::SettingsService;
pub use site_resolver::SiteResolver;
pub use translation::TranslationService;
