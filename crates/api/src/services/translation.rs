//! Free-text translation with cache-aside memoization.
//!
//! Every translate call checks the persistent memoization table first;
//! only misses reach the generative backend, and successful results are
//! written back (upsert, last writer wins) before returning. Lookup keys
//! are the exact `(text, source_lang, target_lang)` triple with no
//! normalization, so textually different inputs are billed as distinct
//! calls.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use persistence::repositories::TranslationRepository;

use crate::middleware::metrics::record_translation;
use crate::services::generative::{GenerativeClient, GenerativeError};

/// Errors from the translation service.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Translation backend is not configured")]
    Unavailable,

    #[error("Translation backend failed: {0}")]
    Backend(#[from] GenerativeError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result of one translate call.
#[derive(Debug, Clone)]
pub struct Translated {
    pub text: String,
    /// True when served from the memoization table.
    pub cached: bool,
}

/// Persistent memoization table seam.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    async fn lookup(
        &self,
        source_text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<String>, sqlx::Error>;

    async fn store(
        &self,
        source_text: &str,
        source_lang: &str,
        target_lang: &str,
        translated: &str,
        context: Option<&str>,
    ) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl TranslationStore for TranslationRepository {
    async fn lookup(
        &self,
        source_text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let entry = self
            .lookup_cached(source_text, source_lang, target_lang)
            .await?;
        Ok(entry.map(|row| row.translated))
    }

    async fn store(
        &self,
        source_text: &str,
        source_lang: &str,
        target_lang: &str,
        translated: &str,
        context: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        self.upsert_cached(source_text, source_lang, target_lang, translated, context)
            .await?;
        Ok(())
    }
}

/// External translation call seam.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        context: Option<&str>,
    ) -> Result<String, GenerativeError>;
}

#[async_trait]
impl TranslationBackend for GenerativeClient {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        context: Option<&str>,
    ) -> Result<String, GenerativeError> {
        let system = "You are a professional translator for a Japanese employment-support \
                      platform. Return only the translated text with no commentary.";
        let prompt = match context {
            Some(context) => format!(
                "Translate the following text from {} to {}.\nContext: {}\n\nText:\n{}",
                source_lang, target_lang, context, text
            ),
            None => format!(
                "Translate the following text from {} to {}.\n\nText:\n{}",
                source_lang, target_lang, text
            ),
        };

        let generated = self.generate_text(&prompt, Some(system)).await?;
        Ok(generated.text.trim().to_string())
    }
}

/// Cache-aside translation service.
pub struct TranslationService {
    store: Arc<dyn TranslationStore>,
    backend: Option<Arc<dyn TranslationBackend>>,
}

impl TranslationService {
    pub fn new(
        store: Arc<dyn TranslationStore>,
        backend: Option<Arc<dyn TranslationBackend>>,
    ) -> Self {
        Self { store, backend }
    }

    /// Translates one text, serving exact-match repeats from the
    /// memoization table.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        context: Option<&str>,
    ) -> Result<Translated, TranslationError> {
        if let Some(hit) = self.store.lookup(text, source_lang, target_lang).await? {
            record_translation(true);
            return Ok(Translated {
                text: hit,
                cached: true,
            });
        }

        let backend = self.backend.as_ref().ok_or(TranslationError::Unavailable)?;
        let translated = backend
            .translate(text, source_lang, target_lang, context)
            .await?;

        // The translation itself succeeded; a failed cache write costs a
        // repeat backend call later, not this request.
        if let Err(e) = self
            .store
            .store(text, source_lang, target_lang, &translated, context)
            .await
        {
            tracing::warn!("Failed to persist translation cache entry: {}", e);
        }

        record_translation(false);
        Ok(Translated {
            text: translated,
            cached: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeStore {
        entries: Mutex<HashMap<(String, String, String), String>>,
        lookups: AtomicUsize,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TranslationStore for FakeStore {
        async fn lookup(
            &self,
            source_text: &str,
            source_lang: &str,
            target_lang: &str,
        ) -> Result<Option<String>, sqlx::Error> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let key = (
                source_text.to_string(),
                source_lang.to_string(),
                target_lang.to_string(),
            );
            Ok(self.entries.lock().unwrap().get(&key).cloned())
        }

        async fn store(
            &self,
            source_text: &str,
            source_lang: &str,
            target_lang: &str,
            translated: &str,
            _context: Option<&str>,
        ) -> Result<(), sqlx::Error> {
            let key = (
                source_text.to_string(),
                source_lang.to_string(),
                target_lang.to_string(),
            );
            self.entries
                .lock()
                .unwrap()
                .insert(key, translated.to_string());
            Ok(())
        }
    }

    struct FakeBackend {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeBackend {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl TranslationBackend for FakeBackend {
        async fn translate(
            &self,
            text: &str,
            _source_lang: &str,
            target_lang: &str,
            _context: Option<&str>,
        ) -> Result<String, GenerativeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GenerativeError::Api {
                    status: 503,
                    body: "overloaded".to_string(),
                });
            }
            if text == "こんにちは" && target_lang == "en" {
                return Ok("Hello".to_string());
            }
            Ok(format!("[{}] {}", target_lang, text))
        }
    }

    #[tokio::test]
    async fn test_first_call_misses_second_hits() {
        let store = Arc::new(FakeStore::new());
        let backend = Arc::new(FakeBackend::new(false));
        let service = TranslationService::new(
            store.clone(),
            Some(backend.clone() as Arc<dyn TranslationBackend>),
        );

        let first = service
            .translate("こんにちは", "ja", "en", None)
            .await
            .unwrap();
        assert_eq!(first.text, "Hello");
        assert!(!first.cached);

        let second = service
            .translate("こんにちは", "ja", "en", None)
            .await
            .unwrap();
        assert_eq!(second.text, "Hello");
        assert!(second.cached);
        assert_eq!(
            backend.calls.load(Ordering::SeqCst),
            1,
            "repeat call must not reach the backend"
        );
    }

    #[tokio::test]
    async fn test_distinct_triples_are_distinct_keys() {
        let store = Arc::new(FakeStore::new());
        let backend = Arc::new(FakeBackend::new(false));
        let service =
            TranslationService::new(store, Some(backend.clone() as Arc<dyn TranslationBackend>));

        service.translate("hello", "en", "ja", None).await.unwrap();
        service.translate("hello", "en", "vi", None).await.unwrap();
        // No normalization: trailing whitespace is a different key.
        service.translate("hello ", "en", "ja", None).await.unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates_and_caches_nothing() {
        let store = Arc::new(FakeStore::new());
        let backend = Arc::new(FakeBackend::new(true));
        let service = TranslationService::new(
            store.clone(),
            Some(backend as Arc<dyn TranslationBackend>),
        );

        let result = service.translate("こんにちは", "ja", "en", None).await;
        assert!(matches!(result, Err(TranslationError::Backend(_))));
        assert!(store.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_backend_is_unavailable() {
        let store = Arc::new(FakeStore::new());
        let service = TranslationService::new(store, None);

        let result = service.translate("hi", "en", "ja", None).await;
        assert!(matches!(result, Err(TranslationError::Unavailable)));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_backend_even_when_unconfigured() {
        let store = Arc::new(FakeStore::new());
        store
            .store("こんにちは", "ja", "en", "Hello", None)
            .await
            .unwrap();
        let service = TranslationService::new(store, None);

        let result = service
            .translate("こんにちは", "ja", "en", None)
            .await
            .unwrap();
        assert_eq!(result.text, "Hello");
        assert!(result.cached);
    }
}
