//! Translation orchestrator: cache, primary dispatch and dictionary merge

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::{Settings, TranslatorConfig};
use crate::core::errors::Result;
use crate::core::history::TranslationHistory;
use crate::core::models::{
    CombinedResult, DictionaryEntry, HistoryKey, TranslationApi, TranslationRequest,
    TranslationResult,
};
use crate::core::script::is_japanese;
use crate::providers::deepl::DeeplTranslator;
use crate::providers::google::GoogleTranslator;
use crate::providers::mazii::MaziiDictionary;
use crate::providers::{DictionaryBackend, TranslationBackend};

/// Translation entry point.
///
/// Cheap to clone; clones share the backends and the history.
#[derive(Clone)]
pub struct Translator {
    google: Arc<dyn TranslationBackend>,
    deepl: Arc<dyn TranslationBackend>,
    dictionary: Arc<dyn DictionaryBackend>,
    history: TranslationHistory,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// Create a translator talking to the configured endpoints, with an empty history
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10);
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;

        let google = GoogleTranslator::new(
            client.clone(),
            config.endpoints.google.clone(),
            config.messages.clone(),
        );
        let deepl = DeeplTranslator::new(
            client.clone(),
            config.endpoints.clone(),
            config.messages.clone(),
        );
        let dictionary = MaziiDictionary::new(
            client,
            config.endpoints.mazii_search.clone(),
            config.endpoints.mazii_mean.clone(),
        );

        info!("Translator ready (default api: {})", config.settings.translation_api);

        Ok(Self::with_backends(
            Arc::new(google),
            Arc::new(deepl),
            Arc::new(dictionary),
            TranslationHistory::new(),
        ))
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env()?;
        Self::new(&config)
    }

    /// Assemble from arbitrary backends and an existing history
    pub fn with_backends(
        google: Arc<dyn TranslationBackend>,
        deepl: Arc<dyn TranslationBackend>,
        dictionary: Arc<dyn DictionaryBackend>,
        history: TranslationHistory,
    ) -> Self {
        Self {
            google,
            deepl,
            dictionary,
            history,
        }
    }

    /// The lookup history shared by every clone of this translator
    pub fn history(&self) -> &TranslationHistory {
        &self.history
    }

    fn backend(&self, api: TranslationApi) -> &dyn TranslationBackend {
        match api {
            TranslationApi::Google => self.google.as_ref(),
            TranslationApi::Deepl => self.deepl.as_ref(),
        }
    }

    /// Translate a word with the request's backend.
    ///
    /// Empty input yields [`TranslationResult::neutral`] without touching the
    /// history. Japanese-script input is also looked up in the dictionary,
    /// concurrently with the primary backend. Every network result is
    /// appended to the history; only non-error ones are served from it.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
        settings: &Settings,
    ) -> CombinedResult {
        let word = request.source_word.trim();
        if word.is_empty() {
            return CombinedResult::new(TranslationResult::neutral(), None);
        }

        let key = HistoryKey::new(
            word,
            request.source_lang.as_str(),
            request.target_lang.as_str(),
            request.translation_api,
        );
        if let Some(cached) = self.history.lookup(&key).await {
            return cached;
        }

        let backend = self.backend(request.translation_api);
        debug!(
            "Translating '{}' ({} -> {}) with {}",
            word,
            request.source_lang,
            request.target_lang,
            backend.api()
        );

        let primary = backend.translate(
            word,
            &request.source_lang,
            &request.target_lang,
            settings,
        );
        let dictionary = self.lookup_dictionary(word);
        let (result_gg, result_mazii) = tokio::join!(primary, dictionary);

        let combined = CombinedResult::new(result_gg, result_mazii);
        self.history.store(key, combined.clone()).await;
        combined
    }

    /// Dictionary entries for Japanese input, `None` when the dictionary does not apply
    async fn lookup_dictionary(&self, word: &str) -> Option<Vec<DictionaryEntry>> {
        if !is_japanese(word) {
            return None;
        }
        Some(self.dictionary.lookup(word).await)
    }

    /// Translate with the backend currently selected in `settings`
    pub async fn translate_text(
        &self,
        source_word: &str,
        source_lang: &str,
        target_lang: &str,
        settings: &Settings,
    ) -> CombinedResult {
        let request = TranslationRequest::new(source_word, target_lang, settings.translation_api)
            .with_source_lang(source_lang);
        self.translate(&request, settings).await
    }
}
